//! Pool and queue statistics

/// Point-in-time accounting snapshot for a queue pool.
///
/// Plain values, not atomics: the pool is single-threaded by construction,
/// so a snapshot is always internally consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total region size in bytes
    pub region_size: usize,
    /// Fixed number of segments in the pool
    pub segment_capacity: usize,
    /// Segments currently owned by live queue chains
    pub segments_live: usize,
    /// Segments on the free list
    pub segments_free: usize,
    /// Segments never yet handed out by the bump frontier
    pub segments_untouched: usize,
    /// Queues currently live
    pub queues_live: usize,
    /// Fixed number of descriptor slots
    pub queue_capacity: usize,
    /// Bytes buffered across all live queues
    pub bytes_buffered: usize,
}

impl PoolStats {
    /// Segments that an enqueue could still claim
    pub fn segments_available(&self) -> usize {
        self.segments_free + self.segments_untouched
    }

    /// Fraction of the segment pool owned by live chains (0.0 to 1.0)
    pub fn utilization(&self) -> f64 {
        if self.segment_capacity == 0 {
            return 0.0;
        }
        self.segments_live as f64 / self.segment_capacity as f64
    }

    /// Whether the next segment allocation would fail
    pub fn is_exhausted(&self) -> bool {
        self.segments_available() == 0
    }

    /// Get a summary string of the statistics
    pub fn summary(&self) -> String {
        format!(
            "PoolStats {{ segments: {}/{} live, {} free, {} untouched, \
             queues: {}/{}, buffered: {} bytes, utilization: {:.2}% }}",
            self.segments_live,
            self.segment_capacity,
            self.segments_free,
            self.segments_untouched,
            self.queues_live,
            self.queue_capacity,
            self.bytes_buffered,
            self.utilization() * 100.0
        )
    }
}

/// Accounting snapshot for one queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Bytes currently buffered
    pub len: usize,
    /// Segments currently owned by the chain (may exceed what `len`
    /// requires by one look-ahead segment)
    pub segment_count: usize,
}

impl QueueStats {
    /// Whether the queue buffers no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservation_arithmetic() {
        let stats = PoolStats {
            region_size: 2048,
            segment_capacity: 95,
            segments_live: 30,
            segments_free: 5,
            segments_untouched: 60,
            queues_live: 3,
            queue_capacity: 64,
            bytes_buffered: 400,
        };
        assert_eq!(stats.segments_available(), 65);
        assert!(!stats.is_exhausted());
        assert!((stats.utilization() - 30.0 / 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_contents() {
        let stats = PoolStats {
            region_size: 2048,
            segment_capacity: 95,
            segments_live: 95,
            segments_free: 0,
            segments_untouched: 0,
            queues_live: 1,
            queue_capacity: 64,
            bytes_buffered: 1329,
        };
        assert!(stats.is_exhausted());
        let summary = stats.summary();
        assert!(summary.contains("95/95"));
        assert!(summary.contains("1329"));
    }
}
