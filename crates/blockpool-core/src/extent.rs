//! Logical block extents.

use std::fmt;

use crate::error::BlockError;

/// The logical extent of a block: `row × cols × depth`.
///
/// Extents are opaque metadata. Every dimension is strictly positive, but
/// nothing ties an extent to the number of bytes the block owns in the
/// arena; a `1×1×1` block and a `64×64×64` block occupy the same slot size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    row: u32,
    cols: u32,
    depth: u32,
}

impl Extent {
    /// Build an extent, rejecting any zero dimension.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::InvalidExtent`] if `row`, `cols` or `depth`
    /// is zero.
    pub fn new(row: u32, cols: u32, depth: u32) -> Result<Self, BlockError> {
        if row == 0 || cols == 0 || depth == 0 {
            return Err(BlockError::InvalidExtent { row, cols, depth });
        }
        Ok(Self { row, cols, depth })
    }

    /// Number of rows.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Product of the three dimensions.
    ///
    /// Computed in `u64`; three `u32` factors can exceed `u64::MAX`, so
    /// the product saturates instead of wrapping.
    pub fn volume(&self) -> u64 {
        (self.row as u64)
            .saturating_mul(self.cols as u64)
            .saturating_mul(self.depth as u64)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.row, self.cols, self.depth)
    }
}
