//! Contiguous block storage.
//!
//! An [`Arena`] is one pre-allocated `Vec<u8>` divided into
//! `capacity_blocks` regions of `block_bytes` each. Region `i` belongs to
//! slot `i` for the arena's whole lifetime.

use std::fmt;

use blockpool_core::{BlockError, BlockIndex};

use crate::config::ArenaConfig;

/// Fixed-capacity contiguous storage for block data.
///
/// Regions are handed out by index, never by pointer, so the arena can be
/// moved freely. Memory is zero-initialised at allocation and is only
/// re-zeroed when the owner asks for it via [`zero`](Arena::zero).
pub struct Arena {
    /// Backing storage. Allocated to full capacity at creation.
    data: Vec<u8>,
    block_bytes: usize,
    capacity_blocks: u32,
}

impl Arena {
    /// Allocate an arena sized for `config.capacity_blocks` blocks.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Capacity`] if the config fails validation or
    /// the system cannot provide the backing memory.
    pub fn allocate(config: &ArenaConfig) -> Result<Self, BlockError> {
        config.validate()?;
        let len = config.arena_bytes();

        let mut data = Vec::new();
        if data.try_reserve_exact(len).is_err() {
            tracing::trace!(
                capacity_blocks = config.capacity_blocks,
                block_bytes = config.block_bytes,
                "arena reservation failed"
            );
            return Err(BlockError::Capacity {
                capacity_blocks: config.capacity_blocks,
                block_bytes: config.block_bytes,
            });
        }
        data.resize(len, 0);

        tracing::debug!(
            capacity_blocks = config.capacity_blocks,
            block_bytes = config.block_bytes,
            arena_bytes = len,
            "arena allocated"
        );

        Ok(Self {
            data,
            block_bytes: config.block_bytes as usize,
            capacity_blocks: config.capacity_blocks,
        })
    }

    /// Shared view of a slot's region.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity_blocks`.
    pub fn block(&self, index: BlockIndex) -> Result<&[u8], BlockError> {
        let range = self.range(index)?;
        Ok(&self.data[range])
    }

    /// Mutable view of a slot's region.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity_blocks`.
    pub fn block_mut(&mut self, index: BlockIndex) -> Result<&mut [u8], BlockError> {
        let range = self.range(index)?;
        Ok(&mut self.data[range])
    }

    /// Zero a slot's region.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity_blocks`.
    pub fn zero(&mut self, index: BlockIndex) -> Result<(), BlockError> {
        self.block_mut(index)?.fill(0);
        Ok(())
    }

    /// Number of block slots.
    pub fn capacity_blocks(&self) -> u32 {
        self.capacity_blocks
    }

    /// Size of each slot's region in bytes.
    pub fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.data.len()
    }

    fn range(&self, index: BlockIndex) -> Result<std::ops::Range<usize>, BlockError> {
        if index.0 >= self.capacity_blocks {
            return Err(BlockError::IndexOutOfRange {
                index,
                capacity: self.capacity_blocks,
            });
        }
        let start = index.as_usize() * self.block_bytes;
        Ok(start..start + self.block_bytes)
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity_blocks", &self.capacity_blocks)
            .field("block_bytes", &self.block_bytes)
            .finish_non_exhaustive()
    }
}
