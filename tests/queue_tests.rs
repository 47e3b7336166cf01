//! Integration tests for queue operations

use quiver::{QueuePool, QuiverError, RegionConfig};

fn reference_pool() -> QueuePool {
    QueuePool::new(RegionConfig::new("test_pool", 2048)).unwrap()
}

#[test]
fn test_single_queue_fifo() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();

    let payload: Vec<u8> = (0..512).map(|i| (i % 256) as u8).collect();
    pool.enqueue_slice(queue, &payload).unwrap();
    assert_eq!(pool.queue_len(queue).unwrap(), 512);

    let drained: Vec<u8> = (0..512).map(|_| pool.dequeue_byte(queue).unwrap()).collect();
    assert_eq!(drained, payload);
    assert!(pool.is_queue_empty(queue).unwrap());
}

#[test]
fn test_reference_scenario() {
    let mut pool = reference_pool();

    let a = pool.create_queue().unwrap();
    pool.enqueue_byte(a, 0).unwrap();
    pool.enqueue_byte(a, 1).unwrap();
    let b = pool.create_queue().unwrap();
    pool.enqueue_byte(b, 3).unwrap();
    pool.enqueue_byte(a, 2).unwrap();
    pool.enqueue_byte(b, 4).unwrap();

    assert_eq!(pool.dequeue_byte(a).unwrap(), 0);
    assert_eq!(pool.dequeue_byte(a).unwrap(), 1);

    pool.enqueue_byte(a, 5).unwrap();
    pool.enqueue_byte(b, 6).unwrap();

    assert_eq!(pool.dequeue_byte(a).unwrap(), 2);
    assert_eq!(pool.dequeue_byte(a).unwrap(), 5);

    pool.destroy_queue(a).unwrap();

    assert_eq!(pool.dequeue_byte(b).unwrap(), 3);
    assert_eq!(pool.dequeue_byte(b).unwrap(), 4);
    assert_eq!(pool.dequeue_byte(b).unwrap(), 6);

    pool.destroy_queue(b).unwrap();

    // Both descriptor slots free, every segment back in the pool
    let stats = pool.stats();
    assert_eq!(stats.queues_live, 0);
    assert_eq!(stats.segments_live, 0);
    assert_eq!(
        stats.segments_free + stats.segments_untouched,
        stats.segment_capacity
    );
}

#[test]
fn test_interleaved_queues_are_independent() {
    let mut pool = reference_pool();
    let first = pool.create_queue().unwrap();
    let second = pool.create_queue().unwrap();

    // Interleave writes so the chains share the segment pool
    for i in 0..100u8 {
        pool.enqueue_byte(first, i).unwrap();
        pool.enqueue_byte(second, 199 - i).unwrap();
    }

    for i in 0..100u8 {
        assert_eq!(pool.dequeue_byte(first).unwrap(), i);
        assert_eq!(pool.dequeue_byte(second).unwrap(), 199 - i);
    }

    assert!(pool.is_queue_empty(first).unwrap());
    assert!(pool.is_queue_empty(second).unwrap());
}

#[test]
fn test_mixed_enqueue_dequeue() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();

    pool.enqueue_slice(queue, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]).unwrap();
    assert_eq!(pool.dequeue_exact(queue, 5).unwrap(), vec![1, 2, 3, 4, 5]);

    pool.enqueue_slice(queue, &(20..40).collect::<Vec<u8>>()).unwrap();
    let mut expected: Vec<u8> = vec![6, 7, 8, 9, 10];
    expected.extend(20..40);
    assert_eq!(pool.dequeue_exact(queue, 25).unwrap(), expected);
    assert_eq!(pool.queue_len(queue).unwrap(), 0);
}

#[test]
fn test_drained_queue_resets() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();

    pool.enqueue_slice(queue, &(0..30).collect::<Vec<u8>>()).unwrap();
    for i in 0..30u8 {
        assert_eq!(pool.dequeue_byte(queue).unwrap(), i);
    }

    let stats = pool.queue_stats(queue).unwrap();
    assert_eq!(stats.len, 0);
    assert_eq!(stats.segment_count, 0);
    assert!(pool.is_queue_empty(queue).unwrap());
    assert_eq!(pool.stats().segments_live, 0);
}

#[test]
fn test_exact_fill_keeps_lookahead_segment() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();

    // Filling a segment exactly chains its successor ahead of need
    pool.enqueue_slice(queue, &(0..14).collect::<Vec<u8>>()).unwrap();
    assert_eq!(pool.queue_stats(queue).unwrap().segment_count, 2);

    for i in 0..14u8 {
        assert_eq!(pool.dequeue_byte(queue).unwrap(), i);
    }

    // The queue buffers nothing but still owns the segment chained ahead
    let stats = pool.queue_stats(queue).unwrap();
    assert_eq!(stats.len, 0);
    assert_eq!(stats.segment_count, 1);
    assert!(pool.is_queue_empty(queue).unwrap());
    assert!(matches!(
        pool.dequeue_byte(queue),
        Err(QuiverError::IllegalOperation { .. })
    ));

    // The next write lands in the retained segment; draining it frees it
    pool.enqueue_byte(queue, 42).unwrap();
    assert_eq!(pool.dequeue_byte(queue).unwrap(), 42);
    assert_eq!(pool.queue_stats(queue).unwrap().segment_count, 0);
}

#[test]
fn test_destroy_then_create_reuses_slot() {
    let mut pool = reference_pool();
    let first = pool.create_queue().unwrap();
    pool.enqueue_slice(first, &[1, 2, 3]).unwrap();
    pool.destroy_queue(first).unwrap();

    let second = pool.create_queue().unwrap();
    assert_eq!(second.slot(), first.slot());
    assert!(pool.is_queue_empty(second).unwrap());
    assert_eq!(pool.queue_stats(second).unwrap().segment_count, 0);
    pool.destroy_queue(second).unwrap();
}

#[test]
fn test_descriptor_exhaustion() {
    let mut pool = reference_pool();
    let handles: Vec<_> = (0..64).map(|_| pool.create_queue().unwrap()).collect();

    assert!(matches!(
        pool.create_queue(),
        Err(QuiverError::OutOfCapacity { capacity: 64, .. })
    ));

    pool.destroy_queue(handles[17]).unwrap();
    let replacement = pool.create_queue().unwrap();
    assert_eq!(replacement.slot(), 17);
}

#[test]
fn test_dequeue_fresh_queue_fails() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();
    assert!(matches!(
        pool.dequeue_byte(queue),
        Err(QuiverError::IllegalOperation { .. })
    ));
}

#[test]
fn test_destroyed_handle_is_rejected() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();
    pool.enqueue_byte(queue, 1).unwrap();
    pool.destroy_queue(queue).unwrap();

    assert!(matches!(
        pool.enqueue_byte(queue, 2),
        Err(QuiverError::IllegalOperation { .. })
    ));
    assert!(matches!(
        pool.dequeue_byte(queue),
        Err(QuiverError::IllegalOperation { .. })
    ));
    assert!(matches!(
        pool.destroy_queue(queue),
        Err(QuiverError::IllegalOperation { .. })
    ));
    assert!(pool.queue_len(queue).is_err());
}

#[test]
fn test_dequeue_exact_checks_length_first() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();
    pool.enqueue_slice(queue, &[7, 8, 9]).unwrap();

    assert!(matches!(
        pool.dequeue_exact(queue, 4),
        Err(QuiverError::IllegalOperation { .. })
    ));
    // The failed request consumed nothing
    assert_eq!(pool.queue_len(queue).unwrap(), 3);
    assert_eq!(pool.dequeue_exact(queue, 3).unwrap(), vec![7, 8, 9]);
}

#[test]
fn test_pool_capacity_exhaustion_and_recovery() {
    let mut pool = reference_pool();
    let queue = pool.create_queue().unwrap();

    // 95 segments hold 1329 bytes before the look-ahead chain fails
    let payload: Vec<u8> = (0..1329).map(|i| (i % 251) as u8).collect();
    pool.enqueue_slice(queue, &payload).unwrap();

    let err = pool.enqueue_byte(queue, 0xEE).unwrap_err();
    assert!(matches!(err, QuiverError::OutOfCapacity { capacity: 95, .. }));

    // The byte that filled the tail stayed enqueued; accounting still holds
    assert_eq!(pool.queue_len(queue).unwrap(), 1330);
    let stats = pool.stats();
    assert_eq!(stats.segments_live, 95);
    assert_eq!(stats.segments_free + stats.segments_untouched, 0);

    // Still exhausted on retry, still no corruption
    assert!(pool.enqueue_byte(queue, 0xEF).is_err());
    assert_eq!(pool.queue_len(queue).unwrap(), 1330);

    // Destroying the queue recovers the whole pool
    pool.destroy_queue(queue).unwrap();
    let stats = pool.stats();
    assert_eq!(stats.segments_live, 0);
    assert_eq!(stats.segments_free, 95);

    let fresh = pool.create_queue().unwrap();
    pool.enqueue_byte(fresh, 1).unwrap();
    assert_eq!(pool.dequeue_byte(fresh).unwrap(), 1);
}
