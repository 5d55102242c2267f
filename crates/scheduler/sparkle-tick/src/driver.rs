//! Host heartbeat contract and the in-process pulse driver.
//!
//! A host clock (game loop, fixed-timestep schedule, test harness) calls
//! registered heartbeats at a steady rate. Tasks subscribe once when they
//! start and cancel when they stop; everything above this layer counts in
//! heartbeats and never looks at wall time.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::DriverConfig;
use crate::ids::{HeartbeatHandle, IdAllocator};

/// What a heartbeat wants after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Beat {
    Continue,
    Done,
}

/// Callback invoked once per delivered heartbeat.
pub type Heartbeat = Box<dyn FnMut() -> Beat>;

/// Execution lane requested by a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    #[default]
    Primary,
    Worker,
}

/// Subscription parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    /// Pulses skipped before the first delivery.
    pub delay: u64,
    /// Pulses between deliveries once the delay elapsed.
    pub interval: u64,
    pub lane: Lane,
}

impl Default for HeartbeatRequest {
    fn default() -> Self {
        Self {
            delay: 0,
            interval: 1,
            lane: Lane::Primary,
        }
    }
}

/// Host-provided source of heartbeats.
pub trait TickDriver {
    fn register(&self, request: HeartbeatRequest, heartbeat: Heartbeat) -> HeartbeatHandle;

    /// Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&self, handle: HeartbeatHandle);
}

/// Driver reference shared by every task built against it.
pub type SharedDriver = Rc<dyn TickDriver>;

struct Subscription {
    wait: u64,
    interval: u64,
    phase: u64,
    lane: Lane,
    heartbeat: Rc<RefCell<Heartbeat>>,
}

#[derive(Default)]
struct DriverInner {
    ids: IdAllocator,
    subs: IndexMap<HeartbeatHandle, Subscription>,
    pulses: u64,
    config: DriverConfig,
    warned: bool,
}

impl DriverInner {
    /// Advance every subscription by one pulse and return the due ones,
    /// primary lane first.
    fn collect_due(&mut self) -> Vec<(HeartbeatHandle, Rc<RefCell<Heartbeat>>)> {
        let mut due = Vec::new();
        let mut worker = Vec::new();
        for (handle, sub) in self.subs.iter_mut() {
            if sub.wait > 0 {
                sub.wait -= 1;
                continue;
            }
            sub.phase += 1;
            if sub.phase < sub.interval {
                continue;
            }
            sub.phase = 0;
            let entry = (*handle, Rc::clone(&sub.heartbeat));
            match sub.lane {
                Lane::Primary => due.push(entry),
                Lane::Worker => worker.push(entry),
            }
        }
        due.extend(worker);
        due
    }
}

/// Single-threaded driver advanced explicitly by its owner.
///
/// Heartbeats run one after another inside [`ManualDriver::pulse`]. The
/// worker lane is served after the primary lane of the same pulse, so a
/// task never runs concurrently with itself.
#[derive(Clone, Default)]
pub struct ManualDriver {
    inner: Rc<RefCell<DriverInner>>,
}

impl ManualDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DriverInner {
                config,
                ..DriverInner::default()
            })),
        }
    }

    /// Type-erased handle for task builders.
    pub fn shared(&self) -> SharedDriver {
        Rc::new(self.clone())
    }

    pub fn config(&self) -> DriverConfig {
        self.inner.borrow().config.clone()
    }

    /// Deliver one heartbeat to every due subscription.
    ///
    /// Subscriptions registered while the pulse runs are first served on the
    /// next pulse. A subscription cancelled mid-pulse is skipped.
    pub fn pulse(&self) {
        let due = {
            let mut inner = self.inner.borrow_mut();
            inner.pulses += 1;
            inner.collect_due()
        };
        for (handle, heartbeat) in due {
            if !self.is_registered(handle) {
                continue;
            }
            let beat = match heartbeat.try_borrow_mut() {
                Ok(mut heartbeat) => (&mut **heartbeat)(),
                Err(_) => Beat::Continue,
            };
            if beat == Beat::Done {
                self.cancel(handle);
            }
        }
    }

    /// Pulse `n` times.
    pub fn run(&self, n: u64) {
        for _ in 0..n {
            self.pulse();
        }
    }

    pub fn pulses(&self) -> u64 {
        self.inner.borrow().pulses
    }

    /// Number of live subscriptions.
    pub fn active(&self) -> usize {
        self.inner.borrow().subs.len()
    }

    pub fn is_registered(&self, handle: HeartbeatHandle) -> bool {
        self.inner.borrow().subs.contains_key(&handle)
    }
}

impl TickDriver for ManualDriver {
    fn register(&self, request: HeartbeatRequest, heartbeat: Heartbeat) -> HeartbeatHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = inner.ids.alloc();
        inner.subs.insert(
            handle,
            Subscription {
                wait: request.delay,
                interval: request.interval.max(1),
                phase: 0,
                lane: request.lane,
                heartbeat: Rc::new(RefCell::new(heartbeat)),
            },
        );
        let threshold = inner.config.subscription_warn_threshold;
        if !inner.warned && inner.subs.len() > threshold {
            inner.warned = true;
            log::warn!(
                "{} live heartbeat subscriptions exceed the threshold of {}",
                inner.subs.len(),
                threshold
            );
        }
        handle
    }

    fn cancel(&self, handle: HeartbeatHandle) {
        self.inner.borrow_mut().subs.shift_remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(driver: &ManualDriver, request: HeartbeatRequest) -> (HeartbeatHandle, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hits);
        let handle = driver.register(
            request,
            Box::new(move || {
                seen.set(seen.get() + 1);
                Beat::Continue
            }),
        );
        (handle, hits)
    }

    #[test]
    fn delay_skips_leading_pulses() {
        let driver = ManualDriver::default();
        let (_, hits) = counter(
            &driver,
            HeartbeatRequest {
                delay: 2,
                ..HeartbeatRequest::default()
            },
        );
        driver.run(2);
        assert_eq!(hits.get(), 0);
        driver.run(3);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn interval_spaces_deliveries() {
        let driver = ManualDriver::default();
        let (_, hits) = counter(
            &driver,
            HeartbeatRequest {
                interval: 3,
                ..HeartbeatRequest::default()
            },
        );
        driver.run(9);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn cancel_stops_delivery() {
        let driver = ManualDriver::default();
        let (handle, hits) = counter(&driver, HeartbeatRequest::default());
        driver.pulse();
        driver.cancel(handle);
        driver.cancel(handle);
        driver.run(4);
        assert_eq!(hits.get(), 1);
        assert_eq!(driver.active(), 0);
    }

    #[test]
    fn done_unsubscribes() {
        let driver = ManualDriver::default();
        let left = Rc::new(Cell::new(2));
        let l = Rc::clone(&left);
        driver.register(
            HeartbeatRequest::default(),
            Box::new(move || {
                l.set(l.get() - 1);
                if l.get() == 0 {
                    Beat::Done
                } else {
                    Beat::Continue
                }
            }),
        );
        driver.run(5);
        assert_eq!(left.get(), 0);
        assert_eq!(driver.active(), 0);
    }

    #[test]
    fn worker_lane_runs_after_primary() {
        let driver = ManualDriver::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (name, lane) in [("worker", Lane::Worker), ("primary", Lane::Primary)] {
            let order = Rc::clone(&order);
            driver.register(
                HeartbeatRequest {
                    lane,
                    ..HeartbeatRequest::default()
                },
                Box::new(move || {
                    order.borrow_mut().push(name);
                    Beat::Continue
                }),
            );
        }
        driver.pulse();
        assert_eq!(*order.borrow(), vec!["primary", "worker"]);
    }

    #[test]
    fn registration_during_pulse_waits_for_next_pulse() {
        let driver = ManualDriver::default();
        let late = Rc::new(Cell::new(0));
        let inner_driver = driver.clone();
        let late_hits = Rc::clone(&late);
        driver.register(
            HeartbeatRequest::default(),
            Box::new(move || {
                let hits = Rc::clone(&late_hits);
                inner_driver.register(
                    HeartbeatRequest::default(),
                    Box::new(move || {
                        hits.set(hits.get() + 1);
                        Beat::Continue
                    }),
                );
                Beat::Done
            }),
        );
        driver.pulse();
        assert_eq!(late.get(), 0);
        driver.pulse();
        assert_eq!(late.get(), 1);
    }
}
