//! Per-slot block metadata.

use blockpool_core::Extent;

/// Metadata for one slot.
///
/// A free record has `occupied == false` and all three extents zero. An
/// occupied record has every extent strictly positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockRecord {
    /// Row count of the block, or 0 when free.
    pub row: u32,
    /// Column count of the block, or 0 when free.
    pub cols: u32,
    /// Depth of the block, or 0 when free.
    pub depth: u32,
    /// Whether a block currently occupies the slot.
    pub occupied: bool,
}

impl BlockRecord {
    /// A free record.
    pub const FREE: Self = Self {
        row: 0,
        cols: 0,
        depth: 0,
        occupied: false,
    };

    pub(crate) fn occupy(&mut self, extent: Extent) {
        self.row = extent.row();
        self.cols = extent.cols();
        self.depth = extent.depth();
        self.occupied = true;
    }

    pub(crate) fn release(&mut self) {
        *self = Self::FREE;
    }

    /// The block's extent, or `None` when the slot is free.
    pub fn extent(&self) -> Option<Extent> {
        if !self.occupied {
            return None;
        }
        Extent::new(self.row, self.cols, self.depth).ok()
    }
}
