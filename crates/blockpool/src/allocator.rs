//! The public create / query / destroy surface.
//!
//! [`BlockAllocator`] owns an [`Arena`] and a [`BlockTable`] behind a
//! single `RwLock`. Mutations take the write lock for their whole
//! duration, so finding a free slot and occupying it is one atomic step.
//! Queries take the read lock and run concurrently with each other.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use blockpool_arena::{Arena, ArenaConfig};
use blockpool_core::{BlockError, BlockIndex, Extent, Result};
use blockpool_table::{BlockTable, TableStats};

/// Table and arena, guarded together.
#[derive(Debug)]
struct Pool {
    table: BlockTable,
    arena: Arena,
}

/// A fixed-capacity pool of blocks, each tagged with a `row × cols × depth`
/// extent and backed by a fixed-size region of one contiguous arena.
///
/// All methods take `&self`; share the allocator across threads with an
/// `Arc`. Every failure is returned to the caller and leaves the pool as
/// it was.
///
/// # Lock poisoning
///
/// Every operation validates before it mutates, so no operation can leave
/// the pool half-updated. A panic inside a [`read_block`](Self::read_block)
/// closure therefore cannot corrupt state, and a poisoned lock is simply
/// recovered.
#[derive(Debug)]
pub struct BlockAllocator {
    pool: RwLock<Pool>,
    capacity: u32,
    block_bytes: usize,
}

// Compile-time assertion: BlockAllocator must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<BlockAllocator>();
};

impl BlockAllocator {
    /// Build an allocator with an arena sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Capacity`] if the config is invalid or the
    /// arena cannot be allocated.
    pub fn new(config: ArenaConfig) -> Result<Self> {
        let arena = Arena::allocate(&config)?;
        let table = BlockTable::new(config.capacity_blocks);
        Ok(Self {
            capacity: config.capacity_blocks,
            block_bytes: arena.block_bytes(),
            pool: RwLock::new(Pool { table, arena }),
        })
    }

    /// Build an allocator for `capacity_blocks` blocks of the default size.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Capacity`] if `capacity_blocks` is zero.
    pub fn with_capacity(capacity_blocks: u32) -> Result<Self> {
        Self::new(ArenaConfig::new(capacity_blocks))
    }

    /// Create a block in the lowest free slot and return its index.
    ///
    /// The slot's bytes are zeroed before the index is handed out.
    ///
    /// # Errors
    ///
    /// [`BlockError::NoFreeSlot`] if the pool is full, otherwise
    /// [`BlockError::InvalidExtent`] if any dimension is zero.
    pub fn create_block(&self, row: u32, cols: u32, depth: u32) -> Result<BlockIndex> {
        let mut pool = self.write();
        let Pool { table, arena } = &mut *pool;

        // Zeroing a free region is unobservable, so it runs before the slot
        // is marked and a failure leaves the table untouched.
        let created = table.find_free_slot().and_then(|index| {
            arena.zero(index)?;
            table
                .mark_occupied(index, row, cols, depth)
                .map(|extent| (index, extent))
        });
        let (index, extent) = match created {
            Ok(created) => created,
            Err(err) => {
                tracing::trace!(row, cols, depth, error = %err, "create_block rejected");
                return Err(err);
            }
        };

        tracing::debug!(index = index.0, extent = %extent, "block created");
        Ok(index)
    }

    /// Whether `index` holds no block.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity`.
    pub fn is_block_empty(&self, index: BlockIndex) -> Result<bool> {
        self.read().table.is_empty(index)
    }

    /// Destroy the block at `index`, freeing its slot.
    ///
    /// # Errors
    ///
    /// [`BlockError::IndexOutOfRange`] or [`BlockError::NotOccupied`].
    pub fn destroy_block(&self, index: BlockIndex) -> Result<()> {
        match self.write().table.mark_free(index) {
            Ok(extent) => {
                tracing::debug!(index = index.0, extent = %extent, "block destroyed");
                Ok(())
            }
            Err(err) => {
                tracing::trace!(index = index.0, error = %err, "destroy_block rejected");
                Err(err)
            }
        }
    }

    /// The extent of the block at `index`, or `None` if the slot is free.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity`.
    pub fn block_extent(&self, index: BlockIndex) -> Result<Option<Extent>> {
        self.read().table.extent(index)
    }

    /// Run `f` over the bytes of the block at `index` under the read lock.
    ///
    /// # Errors
    ///
    /// [`BlockError::IndexOutOfRange`] or [`BlockError::NotOccupied`].
    pub fn read_block<R>(&self, index: BlockIndex, f: impl FnOnce(&[u8]) -> R) -> Result<R> {
        let pool = self.read();
        Self::require_occupied(&pool.table, index)?;
        Ok(f(pool.arena.block(index)?))
    }

    /// Copy `bytes` into the block at `index`, starting `offset` bytes in.
    ///
    /// # Errors
    ///
    /// [`BlockError::IndexOutOfRange`], [`BlockError::NotOccupied`], or
    /// [`BlockError::OutOfBlockBounds`] if the write would run past the
    /// end of the block. Nothing is written on error.
    pub fn write_block(&self, index: BlockIndex, offset: usize, bytes: &[u8]) -> Result<()> {
        let end = offset
            .checked_add(bytes.len())
            .filter(|&end| end <= self.block_bytes)
            .ok_or(BlockError::OutOfBlockBounds {
                offset,
                len: bytes.len(),
                block_bytes: self.block_bytes as u32,
            })?;

        let mut pool = self.write();
        Self::require_occupied(&pool.table, index)?;
        pool.arena.block_mut(index)?[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Destroy every block. Returns how many were destroyed.
    pub fn clear(&self) -> u32 {
        let destroyed = self.write().table.clear();
        tracing::debug!(destroyed, "allocator cleared");
        destroyed
    }

    /// Number of block slots.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Size of each block's byte region.
    pub fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Number of live blocks.
    pub fn occupied_count(&self) -> u32 {
        self.read().table.occupied_count()
    }

    /// Number of free slots.
    pub fn free_count(&self) -> u32 {
        self.read().table.free_count()
    }

    /// Memory held by the backing arena in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.read().arena.memory_bytes()
    }

    /// Snapshot of live blocks and their extents, in ascending index order.
    pub fn occupied_blocks(&self) -> Vec<(BlockIndex, Extent)> {
        self.read().table.occupied().collect()
    }

    /// Allocation statistics.
    pub fn stats(&self) -> TableStats {
        self.read().table.stats()
    }

    fn require_occupied(table: &BlockTable, index: BlockIndex) -> Result<()> {
        if table.is_empty(index)? {
            return Err(BlockError::NotOccupied { index });
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, Pool> {
        self.pool.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Pool> {
        self.pool.write().unwrap_or_else(PoisonError::into_inner)
    }
}
