//! Core types for the blockpool workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the arena, the block table and the allocator:
//! slot identifiers, block extents and the error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod extent;
pub mod id;

pub use error::{BlockError, Result};
pub use extent::Extent;
pub use id::BlockIndex;
