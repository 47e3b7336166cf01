//! Basic usage example of the quiver byte queue pool

use quiver::{QueuePool, RegionConfig, Result};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Quiver Fixed-Region Byte Queues Example");
    println!("=======================================");

    // Create a pool over one 2048-byte region
    let config = RegionConfig::new("example_region", 2048);
    println!("Creating queue pool over region: {}", config.name);

    let mut pool = QueuePool::new(config)?;
    println!("Pool created successfully!");
    println!("  Region size: {} bytes", pool.region().size());
    println!("  Queue slots: {}", pool.queue_capacity());
    println!(
        "  Segment capacity: {} segments",
        pool.region().layout().segment_count()
    );

    // Create two independent queues
    println!("\nCreating queues...");
    let sensor_a = pool.create_queue()?;
    let sensor_b = pool.create_queue()?;
    println!("  Created {} and {}", sensor_a, sensor_b);

    // Interleave writes across the queues
    println!("\nEnqueuing interleaved readings...");
    pool.enqueue_slice(sensor_a, &[10, 11, 12])?;
    pool.enqueue_slice(sensor_b, &[90, 91])?;
    pool.enqueue_byte(sensor_a, 13)?;
    pool.enqueue_byte(sensor_b, 92)?;

    println!("  {}: {} bytes buffered", sensor_a, pool.queue_len(sensor_a)?);
    println!("  {}: {} bytes buffered", sensor_b, pool.queue_len(sensor_b)?);
    println!("  Pool: {}", pool.stats().summary());

    // Each queue drains in its own FIFO order
    println!("\nDraining queue A:");
    while !pool.is_queue_empty(sensor_a)? {
        print!(" {}", pool.dequeue_byte(sensor_a)?);
    }
    println!();

    println!("Draining queue B:");
    let readings = pool.dequeue_exact(sensor_b, 3)?;
    println!(" {:?}", readings);

    // Destroy the queues and confirm every segment went back to the pool
    println!("\nDestroying queues...");
    pool.destroy_queue(sensor_a)?;
    pool.destroy_queue(sensor_b)?;

    let stats = pool.stats();
    println!("  Live queues: {}", stats.queues_live);
    println!("  Segments live: {}", stats.segments_live);
    println!("  Final state: {}", stats.summary());

    println!("\nExample completed successfully!");
    Ok(())
}
