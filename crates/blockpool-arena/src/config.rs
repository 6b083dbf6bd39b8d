//! Arena configuration parameters.

use blockpool_core::BlockError;

/// Configuration for the block arena.
///
/// Controls how many blocks the arena holds and how many bytes each block
/// owns. Validated at construction; all values are immutable after the
/// arena is allocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of block slots.
    ///
    /// Must be at least 1.
    pub capacity_blocks: u32,

    /// Size of each block's region in bytes.
    ///
    /// Default: 4096. Must be at least 1.
    pub block_bytes: u32,
}

impl ArenaConfig {
    /// Default block size: one 4KB page.
    pub const DEFAULT_BLOCK_BYTES: u32 = 4096;

    /// Create a config for `capacity_blocks` blocks of the default size.
    pub fn new(capacity_blocks: u32) -> Self {
        Self {
            capacity_blocks,
            block_bytes: Self::DEFAULT_BLOCK_BYTES,
        }
    }

    /// Set the per-block size in bytes.
    pub fn with_block_bytes(mut self, block_bytes: u32) -> Self {
        self.block_bytes = block_bytes;
        self
    }

    /// Check that the config describes a non-empty, addressable arena.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Capacity`] if either dimension is zero or the
    /// total byte size overflows `usize`.
    pub fn validate(&self) -> Result<(), BlockError> {
        if self.capacity_blocks == 0 || self.block_bytes == 0 || self.checked_bytes().is_none() {
            return Err(BlockError::Capacity {
                capacity_blocks: self.capacity_blocks,
                block_bytes: self.block_bytes,
            });
        }
        Ok(())
    }

    /// Total arena size in bytes.
    ///
    /// Saturates at `usize::MAX`; [`validate`](Self::validate) rejects
    /// configs where that would happen.
    pub fn arena_bytes(&self) -> usize {
        self.checked_bytes().unwrap_or(usize::MAX)
    }

    fn checked_bytes(&self) -> Option<usize> {
        (self.capacity_blocks as usize).checked_mul(self.block_bytes as usize)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(64)
    }
}
