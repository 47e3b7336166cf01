//! Configuration types for queue regions

use serde::{Deserialize, Serialize};

use crate::error::{QuiverError, Result};
use crate::layout::{RegionLayout, MAX_QUEUES, REGION_SIZE};

/// Backing storage kinds for a queue region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackingType {
    /// Region owned as zero-initialized process memory
    Heap,
    /// Anonymous memory file descriptor (Linux-specific)
    #[cfg(target_os = "linux")]
    MemFd,
}

impl Default for BackingType {
    fn default() -> Self {
        Self::Heap
    }
}

impl BackingType {
    /// Check if this backing type is supported on the current platform
    pub fn is_supported(&self) -> bool {
        match self {
            BackingType::Heap => true,
            #[cfg(target_os = "linux")]
            BackingType::MemFd => true,
        }
    }

    /// Get a human-readable name for the backing type
    pub fn name(&self) -> &'static str {
        match self {
            BackingType::Heap => "heap",
            #[cfg(target_os = "linux")]
            BackingType::MemFd => "memfd",
        }
    }
}

/// Configuration for creating a queue region
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Name of the region
    pub name: String,
    /// Total size of the region in bytes
    pub size: usize,
    /// Number of queue descriptor slots
    pub max_queues: usize,
    /// Backing type for the region storage
    pub backing_type: BackingType,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: REGION_SIZE,
            max_queues: MAX_QUEUES,
            backing_type: BackingType::default(),
        }
    }
}

impl RegionConfig {
    /// Create a new region configuration with the reference queue count
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }

    /// Set the number of descriptor slots
    pub fn with_max_queues(mut self, max_queues: usize) -> Self {
        self.max_queues = max_queues;
        self
    }

    /// Set the backing type
    pub fn with_backing_type(mut self, backing_type: BackingType) -> Self {
        self.backing_type = backing_type;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(QuiverError::invalid_parameter(
                "name",
                "Region name cannot be empty",
            ));
        }

        if !self.backing_type.is_supported() {
            return Err(QuiverError::invalid_parameter(
                "backing_type",
                format!(
                    "Backing type {} is not supported on this platform",
                    self.backing_type.name()
                ),
            ));
        }

        self.layout().map(|_| ())
    }

    /// Compute the partitioning this configuration produces
    pub fn layout(&self) -> Result<RegionLayout> {
        RegionLayout::new(self.size, self.max_queues)
    }
}
