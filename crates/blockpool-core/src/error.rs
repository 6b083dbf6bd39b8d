//! Error types for the blockpool workspace.
//!
//! Every fallible operation in the arena, the block table and the
//! allocator reports one of these variants. All of them are recoverable:
//! a failed operation leaves the allocator exactly as it found it.

use std::error::Error;
use std::fmt;

use crate::id::BlockIndex;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BlockError>;

/// Errors that can occur during block operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockError {
    /// The arena could not be sized: zero blocks, zero-byte blocks, or a
    /// total size that does not fit in the address space.
    Capacity {
        /// Requested number of blocks.
        capacity_blocks: u32,
        /// Requested size of each block in bytes.
        block_bytes: u32,
    },
    /// Every slot in the table is occupied.
    NoFreeSlot {
        /// Number of slots in the table.
        capacity: u32,
    },
    /// One or more extent dimensions is zero.
    InvalidExtent {
        /// Requested row count.
        row: u32,
        /// Requested column count.
        cols: u32,
        /// Requested depth.
        depth: u32,
    },
    /// Attempted to occupy a slot that already holds a block.
    AlreadyOccupied {
        /// The occupied slot.
        index: BlockIndex,
    },
    /// Attempted to free or access a slot that holds no block.
    NotOccupied {
        /// The free slot.
        index: BlockIndex,
    },
    /// The index is not below the table capacity.
    IndexOutOfRange {
        /// The offending index.
        index: BlockIndex,
        /// Number of slots in the table.
        capacity: u32,
    },
    /// A data access reaches past the end of the block's byte region.
    OutOfBlockBounds {
        /// Start of the access within the block, in bytes.
        offset: usize,
        /// Length of the access in bytes.
        len: usize,
        /// Size of the block in bytes.
        block_bytes: u32,
    },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity {
                capacity_blocks,
                block_bytes,
            } => {
                write!(
                    f,
                    "invalid arena capacity: {capacity_blocks} blocks of {block_bytes} bytes"
                )
            }
            Self::NoFreeSlot { capacity } => {
                write!(f, "no free slot: all {capacity} slots are occupied")
            }
            Self::InvalidExtent { row, cols, depth } => {
                write!(
                    f,
                    "invalid extent {row}x{cols}x{depth}: every dimension must be positive"
                )
            }
            Self::AlreadyOccupied { index } => write!(f, "slot {index} is already occupied"),
            Self::NotOccupied { index } => write!(f, "slot {index} is not occupied"),
            Self::IndexOutOfRange { index, capacity } => {
                write!(f, "slot {index} out of range for capacity {capacity}")
            }
            Self::OutOfBlockBounds {
                offset,
                len,
                block_bytes,
            } => {
                write!(
                    f,
                    "access of {len} bytes at offset {offset} exceeds block size {block_bytes}"
                )
            }
        }
    }
}

impl Error for BlockError {}
