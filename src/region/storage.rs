//! Queue region storage implementation

#[cfg(target_os = "linux")]
use std::{ffi::CString, os::fd::OwnedFd};

#[cfg(target_os = "linux")]
use memmap2::{MmapMut, MmapOptions};
#[cfg(target_os = "linux")]
use nix::{
    sys::memfd::{memfd_create, MemFdCreateFlag},
    unistd::ftruncate,
};

use crate::error::{QuiverError, Result};
use crate::layout::RegionLayout;

use super::config::{BackingType, RegionConfig};

/// Owned backing storage for a region
#[derive(Debug)]
enum Backing {
    Heap(Box<[u8]>),
    #[cfg(target_os = "linux")]
    MemFd { mmap: MmapMut, _fd: OwnedFd },
}

/// A queue region: one fixed-size byte buffer with its computed layout.
///
/// The buffer is zero-initialized by every backing, so the allocator state
/// starts in the uninitialized-flag-clear state and is brought to a known
/// state on the first allocation.
#[derive(Debug)]
pub struct Region {
    name: String,
    layout: RegionLayout,
    backing: Backing,
}

impl Region {
    /// Create a region from a configuration
    pub fn new(config: RegionConfig) -> Result<Self> {
        config.validate()?;
        let layout = config.layout()?;

        let backing = match config.backing_type {
            BackingType::Heap => Backing::Heap(vec![0u8; config.size].into_boxed_slice()),
            #[cfg(target_os = "linux")]
            BackingType::MemFd => Self::create_memfd_backing(&config)?,
        };

        Ok(Self {
            name: config.name,
            layout,
            backing,
        })
    }

    /// Create memfd-backed storage
    #[cfg(target_os = "linux")]
    fn create_memfd_backing(config: &RegionConfig) -> Result<Backing> {
        let name_cstr = CString::new(config.name.clone())
            .map_err(|_| QuiverError::invalid_parameter("name", "Name contains null bytes"))?;

        let fd = memfd_create(&name_cstr, MemFdCreateFlag::MFD_CLOEXEC)
            .map_err(|e| QuiverError::platform(format!("Failed to create memfd: {}", e)))?;

        ftruncate(&fd, config.size as i64)
            .map_err(|e| QuiverError::platform(format!("Failed to set memfd size: {}", e)))?;

        let mmap = unsafe {
            MmapOptions::new()
                .len(config.size)
                .map_mut(&fd)
                .map_err(|e| QuiverError::from_io(e, "Failed to create memory mapping"))?
        };

        Ok(Backing::MemFd { mmap, _fd: fd })
    }

    /// Get the name of the region
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the size of the region in bytes
    pub fn size(&self) -> usize {
        self.layout.region_size()
    }

    /// Get the computed partitioning of the region
    pub fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    /// Get the raw memory slice (read-only)
    pub fn as_slice(&self) -> &[u8] {
        match &self.backing {
            Backing::Heap(bytes) => bytes,
            #[cfg(target_os = "linux")]
            Backing::MemFd { mmap, .. } => mmap,
        }
    }

    /// Get the raw memory slice (mutable)
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.backing {
            Backing::Heap(bytes) => bytes,
            #[cfg(target_os = "linux")]
            Backing::MemFd { mmap, .. } => mmap,
        }
    }

    /// Check if the region is heap-backed
    pub fn is_heap_backed(&self) -> bool {
        matches!(self.backing, Backing::Heap(_))
    }

    /// Check if the region is memfd-backed
    #[cfg(target_os = "linux")]
    pub fn is_memfd_backed(&self) -> bool {
        matches!(self.backing, Backing::MemFd { .. })
    }
}
