#![allow(dead_code)]
//! sparkle-core: geometric frame generation and particle animations.
//!
//! Shapes are point clouds, paths are eased base-position trajectories, and
//! the three animation kinds (single shape, two-shape morph, chain morph)
//! precompute their frames at build time and replay them on a
//! [`sparkle_tick`] task, drawing through a host [`Renderer`].

pub mod animation;
pub mod chain;
pub mod config;
pub mod error;
pub mod frames;
pub mod interp;
pub mod math;
pub mod morph;
pub mod path;
pub mod playback;
pub mod render;
pub mod shape;
pub mod shapes;

// Re-exports for consumers (hosts and adapters)
pub use animation::{AnimationBuilder, AnimationRunner, ParticleAnimation};
pub use chain::{ChainBuilder, ChainMorph, ChainRunner, Rotation};
pub use config::PlaybackConfig;
pub use error::{FxError, Result};
pub use frames::{chain_frames, morph_frames, normalize_point_count, progressive_count, Frame, FrameSet};
pub use interp::{Easing, Interpolator, Lerp};
pub use math::{rotate_xyz, Location, Vec3};
pub use morph::{MorphBuilder, MorphRunner, ShapeMorph};
pub use path::ParticlePath;
pub use playback::{Cursor, Playback};
pub use render::{DrawCall, NullRenderer, ParticleOptions, RecordingRenderer, Renderer, Rgb};
pub use shape::{PointCloud, Shape, SharedShape};
pub use sparkle_tick;
