//! Object-safe view of anything a [`Sequence`](crate::Sequence) can run.

use crate::state::TaskState;
use crate::task::Hook;

/// Lifecycle surface shared by every task type.
pub trait Schedulable {
    fn start(&self);
    fn stop(&self);
    fn pause(&self);
    fn resume(&self);
    fn reset(&self);
    fn state(&self) -> TaskState;
    fn current(&self) -> u64;

    /// Replace the end hook. Sequences rewire it each time they start an item.
    fn set_on_end(&self, hook: Hook);

    fn is_running(&self) -> bool {
        self.state().is_running()
    }
}

/// Implement [`Schedulable`] for a newtype whose field `.0` already does.
#[macro_export]
macro_rules! delegate_schedulable {
    ($ty:ty) => {
        impl $crate::Schedulable for $ty {
            fn start(&self) {
                $crate::Schedulable::start(&self.0)
            }
            fn stop(&self) {
                $crate::Schedulable::stop(&self.0)
            }
            fn pause(&self) {
                $crate::Schedulable::pause(&self.0)
            }
            fn resume(&self) {
                $crate::Schedulable::resume(&self.0)
            }
            fn reset(&self) {
                $crate::Schedulable::reset(&self.0)
            }
            fn state(&self) -> $crate::TaskState {
                $crate::Schedulable::state(&self.0)
            }
            fn current(&self) -> u64 {
                $crate::Schedulable::current(&self.0)
            }
            fn set_on_end(&self, hook: $crate::Hook) {
                $crate::Schedulable::set_on_end(&self.0, hook)
            }
        }
    };
}
