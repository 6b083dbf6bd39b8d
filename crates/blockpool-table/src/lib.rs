//! Slot occupancy tracking for block pools.
//!
//! A [`BlockTable`] holds exactly one [`BlockRecord`] per slot and answers
//! three questions: which slot is the lowest free one, is a given slot
//! occupied, and what extent does an occupied slot carry. It owns no block
//! data; the arena does.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod record;
pub mod stats;
pub mod table;

pub use record::BlockRecord;
pub use stats::TableStats;
pub use table::BlockTable;
