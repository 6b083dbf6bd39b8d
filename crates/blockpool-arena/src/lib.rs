//! Fixed-capacity backing storage for block pools.
//!
//! An [`Arena`] is a single zero-initialised `Vec<u8>` carved into
//! equally sized regions, one per block slot:
//!
//! ```text
//! Arena (capacity_blocks × block_bytes)
//! ├── slot 0: [0, block_bytes)
//! ├── slot 1: [block_bytes, 2 × block_bytes)
//! └── ...
//! ```
//!
//! The arena never grows, shrinks or reallocates after construction. It
//! knows nothing about occupancy; the block table decides which slots
//! are live.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;

pub use arena::Arena;
pub use config::ArenaConfig;
