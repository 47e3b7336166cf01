//! Region partitioning arithmetic
//!
//! A queue region is one contiguous byte buffer divided into three areas at
//! fixed offsets: the queue descriptor table, the global allocator state
//! block, and the segment pool. [`RegionLayout`] computes the offsets once
//! from the configuration constants; every other module addresses the region
//! through it by integer index, never by raw address.

use crate::error::{QuiverError, Result};

/// Total region size in bytes (reference configuration)
pub const REGION_SIZE: usize = 2048;

/// Maximum number of simultaneously live queues (reference configuration)
pub const MAX_QUEUES: usize = 64;

/// Bytes per queue descriptor record
pub const DESCRIPTOR_SIZE: usize = 8;

/// Bytes of global allocator state
pub const GLOBAL_STATE_SIZE: usize = 8;

/// Payload bytes per segment
pub const SEGMENT_PAYLOAD_SIZE: usize = 14;

/// Bytes per segment record (payload plus 2-byte link)
pub const SEGMENT_SIZE: usize = SEGMENT_PAYLOAD_SIZE + 2;

/// Sentinel index meaning "no segment"
pub const NO_SEGMENT: u16 = u16::MAX;

/// Computed partitioning of a queue region.
///
/// The descriptor table starts at offset 0, the global state block follows
/// it, and the segment pool fills the rest. Segment capacity is derived from
/// the region size, so a non-reference region recomputes it rather than
/// hard-coding 95.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionLayout {
    region_size: usize,
    max_queues: usize,
    global_offset: usize,
    segments_offset: usize,
    segment_count: usize,
}

impl RegionLayout {
    /// Compute the layout for a region of `region_size` bytes holding up to
    /// `max_queues` queues.
    ///
    /// Fails if the region cannot hold the descriptor table, the global
    /// state block, and at least one segment, or if the derived counts do
    /// not fit the 16-bit index space.
    pub fn new(region_size: usize, max_queues: usize) -> Result<Self> {
        if max_queues == 0 {
            return Err(QuiverError::invalid_parameter(
                "max_queues",
                "Queue count must be greater than 0",
            ));
        }
        if max_queues > usize::from(u16::MAX) {
            return Err(QuiverError::invalid_parameter(
                "max_queues",
                "Queue count does not fit the 16-bit handle space",
            ));
        }

        let descriptors_area = max_queues * DESCRIPTOR_SIZE;
        let segments_offset = descriptors_area + GLOBAL_STATE_SIZE;
        if region_size < segments_offset + SEGMENT_SIZE {
            return Err(QuiverError::invalid_parameter(
                "region_size",
                format!(
                    "Region of {} bytes cannot hold {} descriptors plus one segment",
                    region_size, max_queues
                ),
            ));
        }

        let segment_count = (region_size - segments_offset) / SEGMENT_SIZE;
        if segment_count >= usize::from(NO_SEGMENT) {
            return Err(QuiverError::invalid_parameter(
                "region_size",
                "Segment count would collide with the sentinel index",
            ));
        }

        Ok(Self {
            region_size,
            max_queues,
            global_offset: descriptors_area,
            segments_offset,
            segment_count,
        })
    }

    /// Layout of the reference configuration (2048 bytes, 64 queues,
    /// 95 segments).
    pub const fn reference() -> Self {
        let descriptors_area = MAX_QUEUES * DESCRIPTOR_SIZE;
        let segments_offset = descriptors_area + GLOBAL_STATE_SIZE;
        Self {
            region_size: REGION_SIZE,
            max_queues: MAX_QUEUES,
            global_offset: descriptors_area,
            segments_offset,
            segment_count: (REGION_SIZE - segments_offset) / SEGMENT_SIZE,
        }
    }

    /// Total region size in bytes
    pub fn region_size(&self) -> usize {
        self.region_size
    }

    /// Number of descriptor slots
    pub fn max_queues(&self) -> usize {
        self.max_queues
    }

    /// Byte offset of the global allocator state block
    pub fn global_offset(&self) -> usize {
        self.global_offset
    }

    /// Byte offset of the segment pool
    pub fn segments_offset(&self) -> usize {
        self.segments_offset
    }

    /// Number of segments in the pool
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Total payload capacity of the pool in bytes
    pub fn payload_capacity(&self) -> usize {
        self.segment_count * SEGMENT_PAYLOAD_SIZE
    }

    /// Bytes at the end of the region too small to form a segment
    pub fn slack_bytes(&self) -> usize {
        self.region_size - self.segments_offset - self.segment_count * SEGMENT_SIZE
    }

    /// Byte offset of the descriptor record for `slot`
    pub fn descriptor_offset(&self, slot: usize) -> usize {
        debug_assert!(slot < self.max_queues);
        slot * DESCRIPTOR_SIZE
    }

    /// Byte offset of the segment record for `index`
    pub fn segment_offset(&self, index: u16) -> usize {
        debug_assert!(usize::from(index) < self.segment_count);
        self.segments_offset + usize::from(index) * SEGMENT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_layout() {
        let layout = RegionLayout::reference();
        assert_eq!(layout.region_size(), 2048);
        assert_eq!(layout.max_queues(), 64);
        assert_eq!(layout.global_offset(), 512);
        assert_eq!(layout.segments_offset(), 520);
        assert_eq!(layout.segment_count(), 95);
        assert_eq!(layout.payload_capacity(), 95 * 14);
        assert_eq!(layout.slack_bytes(), 8);
        assert_eq!(layout, RegionLayout::new(REGION_SIZE, MAX_QUEUES).unwrap());
    }

    #[test]
    fn test_record_offsets() {
        let layout = RegionLayout::reference();
        assert_eq!(layout.descriptor_offset(0), 0);
        assert_eq!(layout.descriptor_offset(63), 504);
        assert_eq!(layout.segment_offset(0), 520);
        assert_eq!(layout.segment_offset(94), 520 + 94 * 16);
    }

    #[test]
    fn test_capacity_recomputed_for_other_sizes() {
        let layout = RegionLayout::new(4096, 64).unwrap();
        assert_eq!(layout.segment_count(), (4096 - 520) / 16);

        let layout = RegionLayout::new(1024, 8).unwrap();
        assert_eq!(layout.segments_offset(), 8 * 8 + 8);
        assert_eq!(layout.segment_count(), (1024 - 72) / 16);
    }

    #[test]
    fn test_rejects_undersized_region() {
        // 64 descriptors + global state need 520 bytes; one segment needs 16 more
        assert!(RegionLayout::new(535, 64).is_err());
        assert!(RegionLayout::new(536, 64).is_ok());
        assert!(RegionLayout::new(0, 64).is_err());
    }

    #[test]
    fn test_rejects_bad_queue_counts() {
        assert!(RegionLayout::new(2048, 0).is_err());
        assert!(RegionLayout::new(usize::MAX, usize::from(u16::MAX) + 1).is_err());
    }
}
