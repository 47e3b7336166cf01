use clap::{App, Arg, SubCommand};
use quiver::{
    error::QuiverError,
    layout::{RegionLayout, DESCRIPTOR_SIZE, GLOBAL_STATE_SIZE, SEGMENT_PAYLOAD_SIZE, SEGMENT_SIZE},
    QueuePool, RegionConfig, Result,
};

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("quiver-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fixed-region byte queue pool CLI tool")
        .subcommand(
            SubCommand::with_name("layout")
                .about("Print the computed region partitioning")
                .arg(
                    Arg::with_name("size")
                        .short("s")
                        .long("size")
                        .value_name("SIZE")
                        .help("Region size in bytes")
                        .default_value("2048")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("max_queues")
                        .short("q")
                        .long("max-queues")
                        .value_name("COUNT")
                        .help("Number of descriptor slots")
                        .default_value("64")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("demo")
                .about("Run the interleaved two-queue walkthrough"),
        )
        .subcommand(
            SubCommand::with_name("churn")
                .about("Fill and drain queues, reporting throughput")
                .arg(
                    Arg::with_name("queues")
                        .short("q")
                        .long("queues")
                        .value_name("COUNT")
                        .help("Number of live queues")
                        .default_value("4")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("bytes")
                        .short("b")
                        .long("bytes")
                        .value_name("BYTES")
                        .help("Total bytes to move through each queue")
                        .default_value("100000")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Show version and configuration information"),
        )
        .get_matches();

    match matches.subcommand() {
        ("layout", Some(layout_matches)) => handle_layout(layout_matches),
        ("demo", Some(_)) => handle_demo(),
        ("churn", Some(churn_matches)) => handle_churn(churn_matches),
        ("info", Some(_)) => show_info(),
        _ => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn parse_arg<T: std::str::FromStr>(matches: &clap::ArgMatches, name: &str) -> Result<T> {
    matches
        .value_of(name)
        .unwrap_or_default()
        .parse()
        .map_err(|_| QuiverError::invalid_parameter(name, "Invalid numeric value"))
}

fn handle_layout(matches: &clap::ArgMatches) -> Result<()> {
    let size: usize = parse_arg(matches, "size")?;
    let max_queues: usize = parse_arg(matches, "max_queues")?;

    let layout = RegionLayout::new(size, max_queues)?;

    println!("Region layout for {} bytes, {} queues:", size, max_queues);
    println!(
        "  Descriptor table: offset 0, {} bytes ({} x {})",
        layout.global_offset(),
        layout.max_queues(),
        DESCRIPTOR_SIZE
    );
    println!(
        "  Global state:     offset {}, {} bytes",
        layout.global_offset(),
        GLOBAL_STATE_SIZE
    );
    println!(
        "  Segment pool:     offset {}, {} segments x {} bytes ({} payload)",
        layout.segments_offset(),
        layout.segment_count(),
        SEGMENT_SIZE,
        SEGMENT_PAYLOAD_SIZE
    );
    println!("  Slack:            {} bytes", layout.slack_bytes());
    println!(
        "  Payload capacity: {} bytes",
        layout.payload_capacity()
    );

    Ok(())
}

fn handle_demo() -> Result<()> {
    let mut pool = QueuePool::new(RegionConfig::new("demo", 2048))?;

    let a = pool.create_queue()?;
    pool.enqueue_byte(a, 0)?;
    pool.enqueue_byte(a, 1)?;
    let b = pool.create_queue()?;
    pool.enqueue_byte(b, 3)?;
    pool.enqueue_byte(a, 2)?;
    pool.enqueue_byte(b, 4)?;

    print!("{}", pool.dequeue_byte(a)?);
    println!("{}", pool.dequeue_byte(a)?);

    pool.enqueue_byte(a, 5)?;
    pool.enqueue_byte(b, 6)?;

    print!("{}", pool.dequeue_byte(a)?);
    println!("{}", pool.dequeue_byte(a)?);

    pool.destroy_queue(a)?;

    print!("{}", pool.dequeue_byte(b)?);
    print!("{}", pool.dequeue_byte(b)?);
    println!("{}", pool.dequeue_byte(b)?);

    pool.destroy_queue(b)?;

    println!("\nFinal state: {}", pool.stats().summary());
    Ok(())
}

fn handle_churn(matches: &clap::ArgMatches) -> Result<()> {
    let queues: usize = parse_arg(matches, "queues")?;
    let bytes: usize = parse_arg(matches, "bytes")?;

    if queues == 0 {
        return Err(QuiverError::invalid_parameter(
            "queues",
            "Need at least one queue",
        ));
    }

    println!("Churning {} bytes through each of {} queues...", bytes, queues);

    let mut pool = QueuePool::new(RegionConfig::new("churn", 2048))?;
    let handles: Vec<_> = (0..queues)
        .map(|_| pool.create_queue())
        .collect::<Result<_>>()?;

    // Each round buffers one segment's worth per queue, then drains it,
    // so the workload stays inside the pool at any queue count the
    // descriptor table accepts.
    let chunk = SEGMENT_PAYLOAD_SIZE - 1;
    let rounds = bytes / chunk + 1;
    let mut moved = 0usize;

    let start = std::time::Instant::now();
    for round in 0..rounds {
        for &handle in &handles {
            for i in 0..chunk {
                pool.enqueue_byte(handle, (round + i) as u8)?;
            }
        }
        for &handle in &handles {
            for _ in 0..chunk {
                pool.dequeue_byte(handle)?;
            }
            moved += chunk;
        }
    }
    let elapsed = start.elapsed();

    let ops = moved * 2;
    println!("\nResults:");
    println!("  Bytes moved: {}", moved);
    println!("  Total time: {:.2}ms", elapsed.as_millis());
    println!(
        "  Operations/sec: {:.0}",
        ops as f64 / elapsed.as_secs_f64()
    );
    println!("  Final state: {}", pool.stats().summary());

    for handle in handles {
        pool.destroy_queue(handle)?;
    }
    Ok(())
}

fn show_info() -> Result<()> {
    println!("Quiver Fixed-Region Byte Queues");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));

    let layout = RegionLayout::reference();
    println!("\nReference configuration:");
    println!("  Region size: {} bytes", layout.region_size());
    println!("  Queue slots: {}", layout.max_queues());
    println!("  Segments: {} x {} bytes", layout.segment_count(), SEGMENT_SIZE);
    println!("  Payload capacity: {} bytes", layout.payload_capacity());

    println!("\nCapabilities:");
    println!("  - Heap-owned regions");
    #[cfg(target_os = "linux")]
    println!("  - Anonymous memfd-backed regions");
    println!("  - Segment recycling through an intrusive free list");
    println!("  - Per-queue and pool-wide accounting snapshots");

    Ok(())
}
