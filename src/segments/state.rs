//! Global allocator state record

use crate::layout::{RegionLayout, NO_SEGMENT};

/// Allocator bookkeeping stored in the region's global state block.
///
/// Record layout: free-list head (u16 LE), bump frontier (u16 LE),
/// initialized flag (u32 LE). The flag enables the one-time lazy reset on
/// storage that was adopted in an unknown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GlobalState {
    pub free_list_head: u16,
    pub next_unused: u16,
    pub initialized: bool,
}

impl GlobalState {
    /// State of a freshly reset allocator: empty free list, frontier at 0.
    pub(crate) fn empty() -> Self {
        Self {
            free_list_head: NO_SEGMENT,
            next_unused: 0,
            initialized: true,
        }
    }

    /// Load the state block. Storage whose flag is clear reads as the empty
    /// state with the flag still clear, so the other fields are never
    /// interpreted before the one-time reset.
    pub(crate) fn load(bytes: &[u8], layout: &RegionLayout) -> Self {
        let at = layout.global_offset();
        let initialized =
            u32::from_le_bytes([bytes[at + 4], bytes[at + 5], bytes[at + 6], bytes[at + 7]]) != 0;
        if !initialized {
            return Self {
                initialized: false,
                ..Self::empty()
            };
        }
        Self {
            free_list_head: u16::from_le_bytes([bytes[at], bytes[at + 1]]),
            next_unused: u16::from_le_bytes([bytes[at + 2], bytes[at + 3]]),
            initialized: true,
        }
    }

    /// Write the state block back to the region
    pub(crate) fn store(self, bytes: &mut [u8], layout: &RegionLayout) {
        let at = layout.global_offset();
        bytes[at..at + 2].copy_from_slice(&self.free_list_head.to_le_bytes());
        bytes[at + 2..at + 4].copy_from_slice(&self.next_unused.to_le_bytes());
        bytes[at + 4..at + 8].copy_from_slice(&u32::from(self.initialized).to_le_bytes());
    }
}
