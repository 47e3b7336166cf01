//! Queue descriptor table, handles, and the public queue operations

pub(crate) mod descriptor;
pub mod handle;
pub mod pool;

pub use handle::QueueHandle;
pub use pool::QueuePool;
