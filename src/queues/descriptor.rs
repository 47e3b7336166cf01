//! Queue descriptor records

use crate::layout::{RegionLayout, NO_SEGMENT};

/// Decoded per-queue control block.
///
/// Record layout: head segment (u16 LE), tail segment (u16 LE), head offset,
/// tail offset, in-use flag, one pad byte. Offsets are cursors within their
/// own segment; the only cross-segment invariant is that walking head to
/// tail, respecting the cursors, yields exactly the queue's FIFO content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct QueueDescriptor {
    pub head_segment: u16,
    pub tail_segment: u16,
    pub head_offset: u8,
    pub tail_offset: u8,
    pub in_use: bool,
}

impl QueueDescriptor {
    /// A live queue holding no segments
    pub(crate) fn fresh() -> Self {
        Self {
            head_segment: NO_SEGMENT,
            tail_segment: NO_SEGMENT,
            head_offset: 0,
            tail_offset: 0,
            in_use: true,
        }
    }

    /// A slot available for reuse, with all chain state reset
    pub(crate) fn vacant() -> Self {
        Self {
            in_use: false,
            ..Self::fresh()
        }
    }

    /// Whether the queue currently buffers no bytes.
    ///
    /// A queue whose final write filled its tail exactly owns one fully
    /// empty look-ahead segment: head and tail point at it with equal
    /// cursors. That state buffers nothing even though the indices are not
    /// the sentinel.
    pub(crate) fn is_drained(&self) -> bool {
        self.head_segment == NO_SEGMENT
            || (self.head_segment == self.tail_segment && self.head_offset == self.tail_offset)
    }

    pub(crate) fn load(bytes: &[u8], layout: &RegionLayout, slot: usize) -> Self {
        let at = layout.descriptor_offset(slot);
        Self {
            head_segment: u16::from_le_bytes([bytes[at], bytes[at + 1]]),
            tail_segment: u16::from_le_bytes([bytes[at + 2], bytes[at + 3]]),
            head_offset: bytes[at + 4],
            tail_offset: bytes[at + 5],
            in_use: bytes[at + 6] != 0,
        }
    }

    pub(crate) fn store(self, bytes: &mut [u8], layout: &RegionLayout, slot: usize) {
        let at = layout.descriptor_offset(slot);
        bytes[at..at + 2].copy_from_slice(&self.head_segment.to_le_bytes());
        bytes[at + 2..at + 4].copy_from_slice(&self.tail_segment.to_le_bytes());
        bytes[at + 4] = self.head_offset;
        bytes[at + 5] = self.tail_offset;
        bytes[at + 6] = u8::from(self.in_use);
        bytes[at + 7] = 0;
    }
}

/// First descriptor slot not currently in use, if any
pub(crate) fn find_vacant_slot(bytes: &[u8], layout: &RegionLayout) -> Option<usize> {
    (0..layout.max_queues()).find(|&slot| !QueueDescriptor::load(bytes, layout, slot).in_use)
}
