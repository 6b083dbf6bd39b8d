//! The block table: one record per slot plus a lowest-free cursor.

use blockpool_core::{BlockError, BlockIndex, Extent, Result};

use crate::record::BlockRecord;
use crate::stats::TableStats;

/// Tracks occupancy and extents for a fixed number of slots.
///
/// Every index in `[0, capacity)` has exactly one [`BlockRecord`] for the
/// table's whole lifetime. Creating and destroying blocks flips records
/// between occupied and free; nothing is allocated or dropped.
///
/// Slot selection is deterministic: [`find_free_slot`](Self::find_free_slot)
/// always returns the lowest free index. The table keeps a cursor,
/// `lowest_free`, such that every slot below it is occupied and the slot at
/// it (if any) is free, so the lookup is O(1) and the cursor only rescans
/// forward when the slot it points at gets occupied.
///
/// All mutators validate before touching any state. A returned `Err`
/// means the table, its cursor and its [`TableStats`] are unchanged.
#[derive(Clone, Debug)]
pub struct BlockTable {
    records: Vec<BlockRecord>,
    /// Lowest free index, or `records.len()` when full.
    lowest_free: usize,
    stats: TableStats,
}

impl BlockTable {
    /// Create a table with `capacity` free slots.
    pub fn new(capacity: u32) -> Self {
        Self {
            records: vec![BlockRecord::FREE; capacity as usize],
            lowest_free: 0,
            stats: TableStats::default(),
        }
    }

    /// The lowest free slot.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::NoFreeSlot`] if every slot is occupied.
    pub fn find_free_slot(&self) -> Result<BlockIndex> {
        if self.lowest_free >= self.records.len() {
            return Err(BlockError::NoFreeSlot {
                capacity: self.capacity(),
            });
        }
        Ok(BlockIndex(self.lowest_free as u32))
    }

    /// Occupy `index` with a block of the given extent.
    ///
    /// # Errors
    ///
    /// Checked in order: [`BlockError::IndexOutOfRange`],
    /// [`BlockError::InvalidExtent`] if any dimension is zero,
    /// [`BlockError::AlreadyOccupied`].
    pub fn mark_occupied(
        &mut self,
        index: BlockIndex,
        row: u32,
        cols: u32,
        depth: u32,
    ) -> Result<Extent> {
        let slot = self.check_index(index)?;
        let extent = Extent::new(row, cols, depth)?;
        if self.records[slot].occupied {
            return Err(BlockError::AlreadyOccupied { index });
        }

        self.records[slot].occupy(extent);
        self.stats.record_create();
        if slot == self.lowest_free {
            self.advance_lowest_free();
        }
        Ok(extent)
    }

    /// Free the block at `index` and zero its extents.
    ///
    /// Returns the extent the block had.
    ///
    /// # Errors
    ///
    /// [`BlockError::IndexOutOfRange`] or [`BlockError::NotOccupied`].
    pub fn mark_free(&mut self, index: BlockIndex) -> Result<Extent> {
        let slot = self.check_index(index)?;
        let extent = self.records[slot]
            .extent()
            .ok_or(BlockError::NotOccupied { index })?;

        self.records[slot].release();
        self.stats.record_destroy(1);
        self.lowest_free = self.lowest_free.min(slot);
        Ok(extent)
    }

    /// Whether `index` holds no block.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity`.
    pub fn is_empty(&self, index: BlockIndex) -> Result<bool> {
        Ok(!self.get(index)?.occupied)
    }

    /// The record for `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity`.
    pub fn get(&self, index: BlockIndex) -> Result<&BlockRecord> {
        let slot = self.check_index(index)?;
        Ok(&self.records[slot])
    }

    /// The extent at `index`, or `None` if the slot is free.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::IndexOutOfRange`] if `index >= capacity`.
    pub fn extent(&self, index: BlockIndex) -> Result<Option<Extent>> {
        Ok(self.get(index)?.extent())
    }

    /// Number of slots.
    pub fn capacity(&self) -> u32 {
        self.records.len() as u32
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> u32 {
        self.stats.occupied
    }

    /// Number of free slots.
    pub fn free_count(&self) -> u32 {
        self.capacity() - self.stats.occupied
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.lowest_free >= self.records.len()
    }

    /// Occupied slots and their extents, in ascending index order.
    pub fn occupied(&self) -> impl Iterator<Item = (BlockIndex, Extent)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, rec)| rec.extent().map(|e| (BlockIndex(i as u32), e)))
    }

    /// Allocation statistics.
    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Free every slot. Returns how many blocks were destroyed.
    pub fn clear(&mut self) -> u32 {
        let destroyed = self.stats.occupied;
        self.records.fill(BlockRecord::FREE);
        self.stats.record_destroy(destroyed);
        self.lowest_free = 0;
        destroyed
    }

    fn check_index(&self, index: BlockIndex) -> Result<usize> {
        let slot = index.as_usize();
        if slot >= self.records.len() {
            return Err(BlockError::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(slot)
    }

    fn advance_lowest_free(&mut self) {
        self.lowest_free = self.records[self.lowest_free..]
            .iter()
            .position(|rec| !rec.occupied)
            .map_or(self.records.len(), |offset| self.lowest_free + offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupy(table: &mut BlockTable) -> BlockIndex {
        let idx = table.find_free_slot().unwrap();
        table.mark_occupied(idx, 1, 1, 1).unwrap();
        idx
    }

    #[test]
    fn new_table_is_all_free() {
        let table = BlockTable::new(4);
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.free_count(), 4);
        for i in 0..4 {
            assert!(table.is_empty(BlockIndex(i)).unwrap());
        }
    }

    #[test]
    fn find_free_slot_is_lowest_index() {
        let mut table = BlockTable::new(4);
        assert_eq!(occupy(&mut table), BlockIndex(0));
        assert_eq!(occupy(&mut table), BlockIndex(1));
        assert_eq!(occupy(&mut table), BlockIndex(2));

        table.mark_free(BlockIndex(1)).unwrap();
        table.mark_free(BlockIndex(0)).unwrap();
        assert_eq!(table.find_free_slot().unwrap(), BlockIndex(0));
        assert_eq!(occupy(&mut table), BlockIndex(0));
        assert_eq!(occupy(&mut table), BlockIndex(1));
        assert_eq!(occupy(&mut table), BlockIndex(3));
    }

    #[test]
    fn find_free_slot_skips_slots_occupied_out_of_order() {
        let mut table = BlockTable::new(4);
        table.mark_occupied(BlockIndex(1), 1, 1, 1).unwrap();
        table.mark_occupied(BlockIndex(2), 1, 1, 1).unwrap();
        assert_eq!(occupy(&mut table), BlockIndex(0));
        assert_eq!(table.find_free_slot().unwrap(), BlockIndex(3));
    }

    #[test]
    fn full_table_has_no_free_slot() {
        let mut table = BlockTable::new(2);
        occupy(&mut table);
        occupy(&mut table);
        assert!(table.is_full());
        assert_eq!(
            table.find_free_slot(),
            Err(BlockError::NoFreeSlot { capacity: 2 })
        );
    }

    #[test]
    fn mark_occupied_records_extent() {
        let mut table = BlockTable::new(2);
        table.mark_occupied(BlockIndex(1), 3, 4, 5).unwrap();
        let rec = table.get(BlockIndex(1)).unwrap();
        assert_eq!((rec.row, rec.cols, rec.depth, rec.occupied), (3, 4, 5, true));
        assert_eq!(
            table.extent(BlockIndex(1)).unwrap(),
            Some(Extent::new(3, 4, 5).unwrap())
        );
    }

    #[test]
    fn mark_occupied_rejects_zero_dimension() {
        let mut table = BlockTable::new(2);
        let err = table.mark_occupied(BlockIndex(0), 1, 0, 1).unwrap_err();
        assert!(matches!(err, BlockError::InvalidExtent { cols: 0, .. }));
        assert!(table.is_empty(BlockIndex(0)).unwrap());
        assert_eq!(table.stats(), TableStats::default());
    }

    #[test]
    fn mark_occupied_twice_fails() {
        let mut table = BlockTable::new(2);
        table.mark_occupied(BlockIndex(0), 1, 1, 1).unwrap();
        let err = table.mark_occupied(BlockIndex(0), 2, 2, 2).unwrap_err();
        assert_eq!(
            err,
            BlockError::AlreadyOccupied {
                index: BlockIndex(0)
            }
        );
        // Original extent untouched.
        assert_eq!(table.get(BlockIndex(0)).unwrap().row, 1);
        assert_eq!(table.occupied_count(), 1);
    }

    #[test]
    fn index_checked_before_extent() {
        let mut table = BlockTable::new(2);
        let err = table.mark_occupied(BlockIndex(2), 0, 0, 0).unwrap_err();
        assert!(matches!(err, BlockError::IndexOutOfRange { .. }));
    }

    #[test]
    fn mark_free_zeroes_extents() {
        let mut table = BlockTable::new(2);
        table.mark_occupied(BlockIndex(0), 7, 8, 9).unwrap();
        let extent = table.mark_free(BlockIndex(0)).unwrap();
        assert_eq!(extent, Extent::new(7, 8, 9).unwrap());
        assert_eq!(*table.get(BlockIndex(0)).unwrap(), BlockRecord::FREE);
    }

    #[test]
    fn mark_free_twice_fails() {
        let mut table = BlockTable::new(2);
        table.mark_occupied(BlockIndex(0), 1, 1, 1).unwrap();
        table.mark_free(BlockIndex(0)).unwrap();
        assert_eq!(
            table.mark_free(BlockIndex(0)),
            Err(BlockError::NotOccupied {
                index: BlockIndex(0)
            })
        );
        assert_eq!(table.stats().total_destroys, 1);
    }

    #[test]
    fn is_empty_one_past_end_is_out_of_range() {
        let table = BlockTable::new(3);
        assert_eq!(
            table.is_empty(BlockIndex(3)),
            Err(BlockError::IndexOutOfRange {
                index: BlockIndex(3),
                capacity: 3
            })
        );
    }

    #[test]
    fn occupied_iterates_in_index_order() {
        let mut table = BlockTable::new(4);
        table.mark_occupied(BlockIndex(3), 3, 3, 3).unwrap();
        table.mark_occupied(BlockIndex(1), 1, 1, 1).unwrap();
        let live: Vec<_> = table.occupied().map(|(i, _)| i).collect();
        assert_eq!(live, vec![BlockIndex(1), BlockIndex(3)]);
    }

    #[test]
    fn clear_frees_everything() {
        let mut table = BlockTable::new(3);
        occupy(&mut table);
        occupy(&mut table);
        assert_eq!(table.clear(), 2);
        assert_eq!(table.free_count(), 3);
        assert_eq!(table.find_free_slot().unwrap(), BlockIndex(0));
        assert_eq!(table.stats().total_destroys, 2);
        assert_eq!(table.stats().peak_occupied, 2);
    }

    #[test]
    fn zero_capacity_table_is_full() {
        let table = BlockTable::new(0);
        assert!(table.is_full());
        assert!(table.find_free_slot().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Occupy { slot: u32, row: u32 },
            Free { slot: u32 },
            CreateLowest,
        }

        fn arb_op(capacity: u32) -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..capacity + 1, 0u32..3).prop_map(|(slot, row)| Op::Occupy { slot, row }),
                (0..capacity + 1).prop_map(|slot| Op::Free { slot }),
                Just(Op::CreateLowest),
            ]
        }

        proptest! {
            #[test]
            fn matches_boolean_model(ops in prop::collection::vec(arb_op(8), 0..200)) {
                let mut table = BlockTable::new(8);
                let mut model = [false; 8];

                for op in ops {
                    match op {
                        Op::Occupy { slot, row } => {
                            let res = table.mark_occupied(BlockIndex(slot), row, 1, 1);
                            let ok = slot < 8 && row > 0 && !model[slot as usize];
                            prop_assert_eq!(res.is_ok(), ok);
                            if ok {
                                model[slot as usize] = true;
                            }
                        }
                        Op::Free { slot } => {
                            let res = table.mark_free(BlockIndex(slot));
                            let ok = slot < 8 && model[slot as usize];
                            prop_assert_eq!(res.is_ok(), ok);
                            if ok {
                                model[slot as usize] = false;
                            }
                        }
                        Op::CreateLowest => {
                            let expected = model.iter().position(|&o| !o);
                            match table.find_free_slot() {
                                Ok(idx) => {
                                    prop_assert_eq!(Some(idx.as_usize()), expected);
                                    table.mark_occupied(idx, 1, 1, 1).unwrap();
                                    model[idx.as_usize()] = true;
                                }
                                Err(_) => {
                                    prop_assert_eq!(expected, None);
                                }
                            }
                        }
                    }

                    let occupied = model.iter().filter(|&&o| o).count() as u32;
                    prop_assert_eq!(table.occupied_count(), occupied);
                    for (i, &o) in model.iter().enumerate() {
                        prop_assert_eq!(table.is_empty(BlockIndex(i as u32)).unwrap(), !o);
                    }
                }
            }
        }
    }
}
