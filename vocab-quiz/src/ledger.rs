use std::cmp::Reverse;

use indexmap::IndexMap;

use crate::vocabulary::ItemId;

/// Miss counts for the current round, in the order items were first missed.
#[derive(Clone, Debug, Default)]
pub struct IncorrectAnswerLedger {
    misses: IndexMap<ItemId, u32>,
}

impl IncorrectAnswerLedger {
    pub fn record_miss(&mut self, item: ItemId) -> u32 {
        let count = self.misses.entry(item).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.misses.get(&item).copied().unwrap_or(0)
    }

    /// Most-missed first. Items with the same count stay in first-miss order.
    pub fn sorted_descending(&self) -> Vec<(ItemId, u32)> {
        let mut sorted: Vec<(ItemId, u32)> = self
            .misses
            .iter()
            .map(|(item, count)| (*item, *count))
            .collect();
        sorted.sort_by_key(|(_, count)| Reverse(*count));
        sorted
    }

    pub fn total(&self) -> u32 {
        self.misses.values().sum()
    }

    pub fn len(&self) -> usize {
        self.misses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.misses.is_empty()
    }

    pub fn clear(&mut self) {
        self.misses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_descending_is_stable() {
        let mut ledger = IncorrectAnswerLedger::default();
        ledger.record_miss(ItemId(4));
        ledger.record_miss(ItemId(1));
        ledger.record_miss(ItemId(7));
        ledger.record_miss(ItemId(1));
        ledger.record_miss(ItemId(9));

        assert_eq!(
            ledger.sorted_descending(),
            vec![
                (ItemId(1), 2),
                (ItemId(4), 1),
                (ItemId(7), 1),
                (ItemId(9), 1)
            ]
        );
        assert_eq!(ledger.total(), 5);
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn test_record_miss_returns_running_count() {
        let mut ledger = IncorrectAnswerLedger::default();
        assert_eq!(ledger.record_miss(ItemId(0)), 1);
        assert_eq!(ledger.record_miss(ItemId(0)), 2);
        assert_eq!(ledger.count(ItemId(0)), 2);
        assert_eq!(ledger.count(ItemId(3)), 0);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut ledger = IncorrectAnswerLedger::default();
        ledger.record_miss(ItemId(2));
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(ledger.sorted_descending().is_empty());
        ledger.record_miss(ItemId(5));
        assert_eq!(ledger.sorted_descending(), vec![(ItemId(5), 1)]);
    }
}
