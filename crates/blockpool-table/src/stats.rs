//! Lifetime allocation statistics.

/// Counters describing a table's allocation history.
///
/// Only successful operations move these counters; a rejected create or
/// destroy leaves them untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Blocks created since the table was built.
    pub total_creates: u64,
    /// Blocks destroyed since the table was built, including by `clear`.
    pub total_destroys: u64,
    /// Slots occupied right now.
    pub occupied: u32,
    /// Highest value `occupied` has reached.
    pub peak_occupied: u32,
}

impl TableStats {
    pub(crate) fn record_create(&mut self) {
        self.total_creates += 1;
        self.occupied += 1;
        self.peak_occupied = self.peak_occupied.max(self.occupied);
    }

    pub(crate) fn record_destroy(&mut self, count: u32) {
        self.total_destroys += count as u64;
        self.occupied = self.occupied.saturating_sub(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = TableStats::default();
        assert_eq!(s.total_creates, 0);
        assert_eq!(s.total_destroys, 0);
        assert_eq!(s.occupied, 0);
        assert_eq!(s.peak_occupied, 0);
    }

    #[test]
    fn peak_survives_destroy() {
        let mut s = TableStats::default();
        s.record_create();
        s.record_create();
        s.record_destroy(2);
        s.record_create();
        assert_eq!(s.occupied, 1);
        assert_eq!(s.peak_occupied, 2);
        assert_eq!(s.total_creates, 3);
        assert_eq!(s.total_destroys, 2);
    }
}
