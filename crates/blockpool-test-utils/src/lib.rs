//! Test fixtures for blockpool development.
//!
//! Small helpers for building allocators in known states so integration
//! tests and benchmarks don't repeat the same setup loops.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use blockpool::prelude::*;

/// Block size used by the fixtures. Small enough that tests can inspect
/// whole blocks.
pub const FIXTURE_BLOCK_BYTES: u32 = 32;

/// Config for `capacity` blocks of [`FIXTURE_BLOCK_BYTES`].
pub fn small_config(capacity: u32) -> ArenaConfig {
    ArenaConfig::new(capacity).with_block_bytes(FIXTURE_BLOCK_BYTES)
}

/// An empty allocator with `capacity` small blocks.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn empty_allocator(capacity: u32) -> BlockAllocator {
    BlockAllocator::new(small_config(capacity)).expect("fixture config is valid")
}

/// An allocator with every slot occupied.
///
/// Slot `i` holds a block with extent `(i + 1) × 1 × 1`, so tests can tell
/// blocks apart by their row count. Returns the created indices in order.
pub fn full_allocator(capacity: u32) -> (BlockAllocator, Vec<BlockIndex>) {
    let alloc = empty_allocator(capacity);
    let indices: Vec<BlockIndex> = (0..capacity)
        .map(|i| alloc.create_block(i + 1, 1, 1).expect("slot available"))
        .collect();
    (alloc, indices)
}

/// An allocator where only the slots in `occupied` hold blocks.
///
/// Fills the whole pool, then destroys everything not listed, so the
/// resulting table state is independent of creation order.
pub fn allocator_with(capacity: u32, occupied: &[u32]) -> BlockAllocator {
    let (alloc, indices) = full_allocator(capacity);
    for index in indices {
        if !occupied.contains(&index.0) {
            alloc.destroy_block(index).expect("fixture slot is occupied");
        }
    }
    alloc
}

/// The occupancy of every slot as a `Vec<bool>`, `true` = occupied.
pub fn occupancy(alloc: &BlockAllocator) -> Vec<bool> {
    (0..alloc.capacity())
        .map(|i| !alloc.is_block_empty(BlockIndex(i)).expect("index in range"))
        .collect()
}
