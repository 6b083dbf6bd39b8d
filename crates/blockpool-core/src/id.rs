//! Strongly-typed slot identifiers.

use std::fmt;

/// Identifies a slot within a block table.
///
/// Slots are created with the table and numbered `0..capacity`.
/// `BlockIndex(n)` always refers to the same slot (and the same arena
/// region) for the lifetime of the allocator, whether or not a block
/// currently occupies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIndex(pub u32);

impl BlockIndex {
    /// The index as a `usize`, for slicing.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BlockIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<BlockIndex> for u32 {
    fn from(index: BlockIndex) -> Self {
        index.0
    }
}
