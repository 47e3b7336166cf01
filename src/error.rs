//! Error types and handling for quiver

/// Result type alias for quiver operations
pub type Result<T> = std::result::Result<T, QuiverError>;

/// Error type for the fixed-region queue store.
///
/// Queue operations fail with exactly two kinds: [`OutOfCapacity`] when one
/// of the region's fixed resources is exhausted, and [`IllegalOperation`]
/// when a caller violates the handle contract. Both are terminal for the
/// caller's use of the affected state: after `OutOfCapacity` the region
/// cannot satisfy further growth until queues are destroyed, and a handle
/// that produced `IllegalOperation` must not be used again. The remaining
/// variants can only occur while constructing a region.
///
/// [`OutOfCapacity`]: QuiverError::OutOfCapacity
/// [`IllegalOperation`]: QuiverError::IllegalOperation
#[derive(Debug, thiserror::Error)]
pub enum QuiverError {
    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// I/O related errors (memfd creation, memory mapping)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Platform-specific errors
    #[error("Platform error: {message}")]
    Platform { message: String },

    /// A fixed resource of the region is exhausted
    #[error("Out of capacity: {resource} exhausted (capacity {capacity})")]
    OutOfCapacity { resource: String, capacity: usize },

    /// A queue operation violated the handle contract
    #[error("Illegal operation: {operation} - {message}")]
    IllegalOperation { operation: String, message: String },
}

impl QuiverError {
    /// Create an I/O error from a standard I/O error
    pub fn from_io(source: std::io::Error, context: &str) -> Self {
        Self::Io {
            message: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform {
            message: message.into(),
        }
    }

    /// Create an out-of-capacity error
    pub fn out_of_capacity(resource: impl Into<String>, capacity: usize) -> Self {
        Self::OutOfCapacity {
            resource: resource.into(),
            capacity,
        }
    }

    /// Create an illegal operation error
    pub fn illegal_operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IllegalOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for QuiverError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(err, "I/O operation failed")
    }
}
