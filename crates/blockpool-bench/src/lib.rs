//! Benchmark workloads for blockpool.
//!
//! Provides deterministic create / destroy churn for benchmarks and soak
//! tests:
//!
//! - [`ChurnProfile`]: pool size, operation count and create bias
//! - [`churn_ops`]: a seeded operation stream for a profile
//! - [`run_churn`]: replay a stream against an allocator

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use blockpool::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Shape of a churn workload.
#[derive(Clone, Copy, Debug)]
pub struct ChurnProfile {
    /// Number of slots in the pool under test.
    pub capacity: u32,
    /// Number of operations in the stream.
    pub ops: usize,
    /// Probability that an operation is a create rather than a destroy.
    pub create_bias: f64,
    /// Largest extent dimension drawn for a create.
    pub max_dim: u32,
}

impl ChurnProfile {
    /// 1K slots, 10K ops, slightly create-biased so the pool hovers
    /// near full and exercises the lowest-free scan.
    pub fn reference() -> Self {
        Self {
            capacity: 1024,
            ops: 10_000,
            create_bias: 0.55,
            max_dim: 64,
        }
    }

    /// 64K slots, 100K ops.
    pub fn stress() -> Self {
        Self {
            capacity: 65_536,
            ops: 100_000,
            create_bias: 0.55,
            max_dim: 256,
        }
    }
}

/// One step of a churn workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChurnOp {
    /// Create a block with this extent.
    Create {
        /// Row count.
        row: u32,
        /// Column count.
        cols: u32,
        /// Depth.
        depth: u32,
    },
    /// Destroy the `n`-th live block, counted modulo the live set size.
    Destroy {
        /// Position in the live set.
        n: usize,
    },
}

/// Generate a deterministic operation stream for `profile`.
///
/// Identical `(profile, seed)` pairs always produce identical streams.
pub fn churn_ops(profile: &ChurnProfile, seed: u64) -> Vec<ChurnOp> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let max_dim = profile.max_dim.max(1);
    (0..profile.ops)
        .map(|_| {
            if rng.random_bool(profile.create_bias) {
                ChurnOp::Create {
                    row: rng.random_range(1..=max_dim),
                    cols: rng.random_range(1..=max_dim),
                    depth: rng.random_range(1..=max_dim),
                }
            } else {
                ChurnOp::Destroy {
                    n: rng.random_range(0..usize::MAX),
                }
            }
        })
        .collect()
}

/// Outcome counts from [`run_churn`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChurnOutcome {
    /// Creates that returned a slot.
    pub created: u64,
    /// Creates rejected because the pool was full.
    pub rejected_full: u64,
    /// Destroys that freed a block.
    pub destroyed: u64,
    /// Destroys skipped because nothing was live.
    pub skipped_empty: u64,
}

/// Replay `ops` against `alloc`, tracking live blocks locally.
///
/// # Panics
///
/// Panics on any error other than [`BlockError::NoFreeSlot`]; a valid
/// stream against a valid pool never produces one.
pub fn run_churn(alloc: &BlockAllocator, ops: &[ChurnOp]) -> ChurnOutcome {
    let mut live: Vec<BlockIndex> = Vec::with_capacity(alloc.capacity() as usize);
    let mut outcome = ChurnOutcome::default();

    for op in ops {
        match *op {
            ChurnOp::Create { row, cols, depth } => match alloc.create_block(row, cols, depth) {
                Ok(idx) => {
                    live.push(idx);
                    outcome.created += 1;
                }
                Err(BlockError::NoFreeSlot { .. }) => outcome.rejected_full += 1,
                Err(other) => panic!("churn create failed: {other}"),
            },
            ChurnOp::Destroy { n } => {
                if live.is_empty() {
                    outcome.skipped_empty += 1;
                    continue;
                }
                let idx = live.swap_remove(n % live.len());
                if let Err(err) = alloc.destroy_block(idx) {
                    panic!("churn destroy of {idx} failed: {err}");
                }
                outcome.destroyed += 1;
            }
        }
    }
    outcome
}
