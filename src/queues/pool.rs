//! Fixed-region pool of FIFO byte queues

use crate::error::{QuiverError, Result};
use crate::layout::{RegionLayout, NO_SEGMENT, SEGMENT_PAYLOAD_SIZE};
use crate::region::{Region, RegionConfig};
use crate::segments::{allocator, segment};
use crate::stats::{PoolStats, QueueStats};

use super::descriptor::{self, QueueDescriptor};
use super::handle::QueueHandle;

/// Fixed-capacity pool of independent FIFO byte queues sharing one
/// preallocated memory region.
///
/// Queues grow and shrink at runtime by borrowing and returning fixed-size
/// segments from the region's shared pool; neither the pool nor any queue
/// ever allocates outside the region. All operations take `&mut self`, so
/// access is serialized by the borrow checker; the pool has no internal
/// locking and is single-threaded by construction.
///
/// # Examples
///
/// ```
/// use quiver::{QueuePool, RegionConfig};
///
/// # fn main() -> quiver::Result<()> {
/// let mut pool = QueuePool::new(RegionConfig::new("example", 2048))?;
/// let queue = pool.create_queue()?;
/// pool.enqueue_byte(queue, 7)?;
/// assert_eq!(pool.dequeue_byte(queue)?, 7);
/// pool.destroy_queue(queue)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueuePool {
    region: Region,
}

impl QueuePool {
    /// Create a pool over a freshly created region
    pub fn new(config: RegionConfig) -> Result<Self> {
        Ok(Self {
            region: Region::new(config)?,
        })
    }

    /// Adopt an existing region.
    ///
    /// Storage in an unknown state is brought to a known state by the
    /// allocator's one-time reset on first use.
    pub fn from_region(region: Region) -> Self {
        Self { region }
    }

    /// Access the underlying region
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Number of descriptor slots in the region
    pub fn queue_capacity(&self) -> usize {
        self.region.layout().max_queues()
    }

    /// Number of queues currently live
    pub fn live_queues(&self) -> usize {
        let layout = *self.region.layout();
        let bytes = self.region.as_slice();
        (0..layout.max_queues())
            .filter(|&slot| QueueDescriptor::load(bytes, &layout, slot).in_use)
            .count()
    }

    /// Claim the first free descriptor slot and return a handle to it.
    ///
    /// Fails with an out-of-capacity error when every slot is live.
    pub fn create_queue(&mut self) -> Result<QueueHandle> {
        let layout = *self.region.layout();
        let bytes = self.region.as_mut_slice();

        match descriptor::find_vacant_slot(bytes, &layout) {
            Some(slot) => {
                QueueDescriptor::fresh().store(bytes, &layout, slot);
                Ok(QueueHandle::new(slot as u16))
            }
            None => Err(QuiverError::out_of_capacity(
                "queue descriptors",
                layout.max_queues(),
            )),
        }
    }

    /// Destroy a queue, returning every segment in its chain to the pool.
    ///
    /// The handle must not be used afterwards; reuse is caught by the
    /// in-use validation.
    pub fn destroy_queue(&mut self, handle: QueueHandle) -> Result<()> {
        let layout = *self.region.layout();
        let desc = self.resolve(handle, "destroy_queue")?;
        let bytes = self.region.as_mut_slice();

        let mut cursor = desc.head_segment;
        while cursor != NO_SEGMENT {
            let next = segment::next_of(bytes, &layout, cursor);
            allocator::release(bytes, &layout, cursor);
            cursor = next;
        }

        QueueDescriptor::vacant().store(bytes, &layout, handle.slot());
        Ok(())
    }

    /// Append one byte to the queue.
    ///
    /// Grows the queue's segment chain on demand. When a write fills the
    /// tail segment, the next segment is allocated and linked immediately,
    /// so the write cursor always points at a segment with room. If that
    /// look-ahead allocation fails, the byte remains enqueued and the
    /// out-of-capacity error is returned; the caller must not continue
    /// enqueuing until queues have been destroyed.
    pub fn enqueue_byte(&mut self, handle: QueueHandle, value: u8) -> Result<()> {
        let layout = *self.region.layout();
        let mut desc = self.resolve(handle, "enqueue_byte")?;
        let bytes = self.region.as_mut_slice();

        if desc.tail_segment == NO_SEGMENT {
            let first = allocator::acquire(bytes, &layout)?;
            segment::set_next(bytes, &layout, first, NO_SEGMENT);
            desc.head_segment = first;
            desc.tail_segment = first;
            desc.head_offset = 0;
            desc.tail_offset = 0;
        } else if usize::from(desc.tail_offset) == SEGMENT_PAYLOAD_SIZE {
            // An earlier filling write could not chain its successor;
            // complete the link before accepting the byte.
            Self::link_new_tail(bytes, &layout, &mut desc)?;
        }

        segment::payload_mut(bytes, &layout, desc.tail_segment)[usize::from(desc.tail_offset)] =
            value;
        desc.tail_offset += 1;

        if usize::from(desc.tail_offset) == SEGMENT_PAYLOAD_SIZE {
            if let Err(err) = Self::link_new_tail(bytes, &layout, &mut desc) {
                desc.store(bytes, &layout, handle.slot());
                return Err(err);
            }
        }

        desc.store(bytes, &layout, handle.slot());
        Ok(())
    }

    /// Remove and return the oldest byte in the queue.
    ///
    /// Fails with an illegal-operation error when the queue buffers no
    /// bytes; an empty queue is a caller contract violation here, never a
    /// recoverable "try again" signal.
    pub fn dequeue_byte(&mut self, handle: QueueHandle) -> Result<u8> {
        let layout = *self.region.layout();
        let mut desc = self.resolve(handle, "dequeue_byte")?;
        if desc.is_drained() {
            return Err(QuiverError::illegal_operation(
                "dequeue_byte",
                "queue is empty",
            ));
        }
        let bytes = self.region.as_mut_slice();

        let value = segment::payload(bytes, &layout, desc.head_segment)[usize::from(desc.head_offset)];
        desc.head_offset += 1;

        if desc.head_segment == desc.tail_segment && desc.head_offset == desc.tail_offset {
            // Every produced byte is consumed; the sole segment goes back
            allocator::release(bytes, &layout, desc.head_segment);
            desc = QueueDescriptor::fresh();
        } else if usize::from(desc.head_offset) == SEGMENT_PAYLOAD_SIZE {
            let consumed = desc.head_segment;
            desc.head_segment = segment::next_of(bytes, &layout, consumed);
            desc.head_offset = 0;
            allocator::release(bytes, &layout, consumed);
        }

        desc.store(bytes, &layout, handle.slot());
        Ok(value)
    }

    /// Append every byte of `values` in order.
    ///
    /// Stops at the first error; bytes already appended remain enqueued.
    pub fn enqueue_slice(&mut self, handle: QueueHandle, values: &[u8]) -> Result<()> {
        for &value in values {
            self.enqueue_byte(handle, value)?;
        }
        Ok(())
    }

    /// Remove exactly `count` bytes in FIFO order.
    ///
    /// Fails without touching the queue when fewer bytes are buffered.
    pub fn dequeue_exact(&mut self, handle: QueueHandle, count: usize) -> Result<Vec<u8>> {
        let buffered = self.queue_len(handle)?;
        if buffered < count {
            return Err(QuiverError::illegal_operation(
                "dequeue_exact",
                format!("queue buffers {} bytes, {} requested", buffered, count),
            ));
        }
        (0..count).map(|_| self.dequeue_byte(handle)).collect()
    }

    /// Number of bytes currently buffered in the queue
    pub fn queue_len(&self, handle: QueueHandle) -> Result<usize> {
        let desc = self.resolve(handle, "queue_len")?;
        Ok(Self::chain_bytes(
            self.region.as_slice(),
            self.region.layout(),
            &desc,
        ))
    }

    /// Whether the queue currently buffers no bytes
    pub fn is_queue_empty(&self, handle: QueueHandle) -> Result<bool> {
        Ok(self.resolve(handle, "is_queue_empty")?.is_drained())
    }

    /// Per-queue accounting snapshot
    pub fn queue_stats(&self, handle: QueueHandle) -> Result<QueueStats> {
        let desc = self.resolve(handle, "queue_stats")?;
        let layout = self.region.layout();
        let bytes = self.region.as_slice();
        Ok(QueueStats {
            len: Self::chain_bytes(bytes, layout, &desc),
            segment_count: Self::chain_segments(bytes, layout, &desc),
        })
    }

    /// Pool-wide accounting snapshot.
    ///
    /// The returned counts always satisfy the conservation law
    /// `segments_live + segments_free + segments_untouched ==
    /// segment_capacity`.
    pub fn stats(&self) -> PoolStats {
        let layout = *self.region.layout();
        let bytes = self.region.as_slice();

        let mut queues_live = 0;
        let mut segments_live = 0;
        let mut bytes_buffered = 0;
        for slot in 0..layout.max_queues() {
            let desc = QueueDescriptor::load(bytes, &layout, slot);
            if !desc.in_use {
                continue;
            }
            queues_live += 1;
            segments_live += Self::chain_segments(bytes, &layout, &desc);
            bytes_buffered += Self::chain_bytes(bytes, &layout, &desc);
        }

        PoolStats {
            region_size: layout.region_size(),
            segment_capacity: layout.segment_count(),
            segments_live,
            segments_free: allocator::free_list_len(bytes, &layout),
            segments_untouched: allocator::untouched(bytes, &layout),
            queues_live,
            queue_capacity: layout.max_queues(),
            bytes_buffered,
        }
    }

    /// Validate a handle and load its descriptor
    fn resolve(&self, handle: QueueHandle, operation: &str) -> Result<QueueDescriptor> {
        let layout = self.region.layout();
        if handle.slot() >= layout.max_queues() {
            return Err(QuiverError::illegal_operation(
                operation,
                format!("handle slot {} is out of range", handle.slot()),
            ));
        }
        let desc = QueueDescriptor::load(self.region.as_slice(), layout, handle.slot());
        if !desc.in_use {
            return Err(QuiverError::illegal_operation(
                operation,
                format!("queue slot {} is not in use", handle.slot()),
            ));
        }
        Ok(desc)
    }

    /// Allocate a segment and link it as the queue's new tail
    fn link_new_tail(
        bytes: &mut [u8],
        layout: &RegionLayout,
        desc: &mut QueueDescriptor,
    ) -> Result<()> {
        let fresh = allocator::acquire(bytes, layout)?;
        segment::set_next(bytes, layout, fresh, NO_SEGMENT);
        segment::set_next(bytes, layout, desc.tail_segment, fresh);
        desc.tail_segment = fresh;
        desc.tail_offset = 0;
        Ok(())
    }

    /// Bytes buffered in a descriptor's chain
    fn chain_bytes(bytes: &[u8], layout: &RegionLayout, desc: &QueueDescriptor) -> usize {
        if desc.head_segment == NO_SEGMENT {
            return 0;
        }
        if desc.head_segment == desc.tail_segment {
            return usize::from(desc.tail_offset) - usize::from(desc.head_offset);
        }

        let mut total = SEGMENT_PAYLOAD_SIZE - usize::from(desc.head_offset);
        let mut cursor = segment::next_of(bytes, layout, desc.head_segment);
        while cursor != desc.tail_segment {
            total += SEGMENT_PAYLOAD_SIZE;
            cursor = segment::next_of(bytes, layout, cursor);
        }
        total + usize::from(desc.tail_offset)
    }

    /// Segments owned by a descriptor's chain
    fn chain_segments(bytes: &[u8], layout: &RegionLayout, desc: &QueueDescriptor) -> usize {
        let mut count = 0;
        let mut cursor = desc.head_segment;
        while cursor != NO_SEGMENT {
            count += 1;
            cursor = segment::next_of(bytes, layout, cursor);
        }
        count
    }
}
