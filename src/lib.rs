//! # Quiver - Fixed-Region Multi-Queue Byte Storage
//!
//! Quiver multiplexes many independent FIFO byte queues over a single
//! preallocated memory region, without touching a general-purpose heap.
//! Queue count and total storage are bounded up front; individual queues
//! grow and shrink at runtime by borrowing and returning fixed-size
//! segments from the region's shared pool.
//!
//! ## Features
//!
//! - **Fixed-capacity region**: one contiguous buffer (2048 bytes in the
//!   reference configuration) partitioned at fixed offsets
//! - **Segment recycling**: bump-frontier allocation with free-list reuse,
//!   no fragmentation-prone variable sizes
//! - **Index-addressed chains**: queues are singly-linked segment lists
//!   addressed by integer index, never by raw pointer
//! - **Deterministic failure**: capacity exhaustion and handle misuse
//!   surface as two explicit error kinds
//! - **Pluggable backing**: heap-owned storage by default, anonymous memfd
//!   on Linux
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Memory Region (2048 B)               │
//! ├──────────────────┬───────────────┬───────────────────┤
//! │ Descriptor Table │ Global State  │   Segment Pool    │
//! │  64 × 8 bytes    │   8 bytes     │    95 × 16 bytes  │
//! │  head/tail/use   │ free list,    │  2 B link +       │
//! │  per queue       │ bump frontier │  14 B payload     │
//! └──────────────────┴───────────────┴───────────────────┘
//!          ▲                 ▲                 ▲
//!          │                 │                 │
//!     QueuePool ──► descriptor ops ──► segment allocator
//! ```
//!
//! ## Example
//!
//! ```
//! use quiver::{QueuePool, RegionConfig};
//!
//! # fn main() -> quiver::Result<()> {
//! let mut pool = QueuePool::new(RegionConfig::new("example", 2048))?;
//!
//! let orders = pool.create_queue()?;
//! let fills = pool.create_queue()?;
//!
//! pool.enqueue_slice(orders, &[1, 2, 3])?;
//! pool.enqueue_byte(fills, 9)?;
//!
//! assert_eq!(pool.dequeue_byte(orders)?, 1);
//! assert_eq!(pool.dequeue_byte(fills)?, 9);
//! assert_eq!(pool.queue_len(orders)?, 2);
//!
//! pool.destroy_queue(orders)?;
//! pool.destroy_queue(fills)?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod error;
pub mod layout;
pub mod queues;
pub mod region;
pub mod stats;

pub(crate) mod segments;

// Main API re-exports
pub use error::{QuiverError, Result};
pub use layout::RegionLayout;
pub use queues::{QueueHandle, QueuePool};
pub use region::{BackingType, Region, RegionConfig};
pub use stats::{PoolStats, QueueStats};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
