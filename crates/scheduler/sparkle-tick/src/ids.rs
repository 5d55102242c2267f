//! Identifiers handed out by tick drivers.

use serde::{Deserialize, Serialize};

/// Opaque handle for one heartbeat subscription.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HeartbeatHandle(pub u64);

/// Monotonic allocator for heartbeat handles.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> HeartbeatHandle {
        let id = HeartbeatHandle(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}
