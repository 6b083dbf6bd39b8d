//! blockpool: a fixed-size block allocator with 3D extent tracking.
//!
//! A [`BlockAllocator`] owns a fixed number of slots. Each slot owns one
//! equally sized region of a contiguous arena and can hold at most one
//! block, tagged with a `row × cols × depth` extent. Blocks are created in
//! the lowest free slot, queried by index, and destroyed back to free.
//!
//! # Quick start
//!
//! ```rust
//! use blockpool::prelude::*;
//!
//! let pool = BlockAllocator::new(ArenaConfig::new(4).with_block_bytes(64)).unwrap();
//!
//! let a = pool.create_block(2, 3, 4).unwrap();
//! assert_eq!(a, BlockIndex(0));
//! assert!(!pool.is_block_empty(a).unwrap());
//!
//! pool.write_block(a, 0, b"hello").unwrap();
//! assert_eq!(pool.read_block(a, |bytes| bytes[..5].to_vec()).unwrap(), b"hello");
//!
//! pool.destroy_block(a).unwrap();
//! assert!(pool.is_block_empty(a).unwrap());
//! assert_eq!(pool.destroy_block(a), Err(BlockError::NotOccupied { index: a }));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `blockpool-core` | `BlockIndex`, `Extent`, `BlockError` |
//! | [`arena`] | `blockpool-arena` | `Arena` storage and `ArenaConfig` |
//! | [`table`] | `blockpool-table` | `BlockTable` occupancy tracking and `TableStats` |
//!
//! # Logging
//!
//! Operations emit `tracing` events (`debug` on state changes, `trace` on
//! rejected calls). The crate never installs a subscriber.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;

pub use allocator::BlockAllocator;

/// Identifiers, extents and errors (`blockpool-core`).
pub use blockpool_core as types;

/// Backing storage and its configuration (`blockpool-arena`).
pub use blockpool_arena as arena;

/// Slot occupancy tracking (`blockpool-table`).
///
/// [`table::BlockTable`] is usable on its own when no backing storage is
/// needed, e.g. to manage slots in externally owned memory.
pub use blockpool_table as table;

/// Common imports for typical blockpool usage.
///
/// ```rust
/// use blockpool::prelude::*;
/// ```
pub mod prelude {
    pub use crate::allocator::BlockAllocator;
    pub use blockpool_arena::ArenaConfig;
    pub use blockpool_core::{BlockError, BlockIndex, Extent};
    pub use blockpool_table::TableStats;
}
