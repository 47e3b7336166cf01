//! Queue handles

use std::fmt;

/// Stable reference to a live queue slot.
///
/// Handles are issued by [`QueuePool::create_queue`] and stay valid until
/// the queue is destroyed. Every operation re-validates the handle, so a
/// destroyed or foreign handle fails with an illegal-operation error rather
/// than touching another queue's state.
///
/// [`QueuePool::create_queue`]: super::QueuePool::create_queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueueHandle(u16);

impl QueueHandle {
    pub(crate) fn new(slot: u16) -> Self {
        Self(slot)
    }

    /// Descriptor slot index this handle refers to
    pub fn slot(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for QueueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue#{}", self.0)
    }
}
