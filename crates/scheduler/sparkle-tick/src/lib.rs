#![allow(dead_code)]
//! sparkle-tick: cooperative, tick-driven task scheduling.
//!
//! Tasks count host heartbeats delivered by a [`TickDriver`], fire lifecycle
//! callbacks and can be chained into [`Sequence`]s. Everything runs on the
//! thread that pulses the driver.

pub mod config;
pub mod driver;
pub mod error;
pub mod ids;
pub mod schedulable;
pub mod sequence;
pub mod state;
pub mod task;

pub use config::{DriverConfig, TaskConfig};
pub use driver::{Beat, Heartbeat, HeartbeatRequest, Lane, ManualDriver, SharedDriver, TickDriver};
pub use error::{Result, TickError};
pub use ids::HeartbeatHandle;
pub use schedulable::Schedulable;
pub use sequence::{Sequence, SequenceBuilder, SequenceItem, SequenceRunner};
pub use state::TaskState;
pub use task::{Hook, Hooks, TaskBehavior, TaskBuilder, TaskCtl, TickTask, WeakTask};
