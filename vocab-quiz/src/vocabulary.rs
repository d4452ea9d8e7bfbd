use serde::{Deserialize, Serialize};
use vocab_utils::CorpusEntry;

/// Position of an item in the corpus. Two rows with the same text are still two items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Seconds until the next review after `correct_streak` consecutive correct answers.
pub fn review_interval(correct_streak: u32) -> f64 {
    match correct_streak {
        0 => 0.0,
        1 => 30.0,
        2 => 120.0,
        3 => 300.0,
        _ => 600.0,
    }
}

/// A term/translation pair plus its learning history for the current round.
/// All times are seconds since the round started.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    entry: CorpusEntry,
    correct_streak: u32,
    incorrect_count: u32,
    last_correct_time: f64,
    next_review_due: f64,
}

impl VocabularyItem {
    pub fn new(entry: CorpusEntry) -> Self {
        Self {
            entry,
            correct_streak: 0,
            incorrect_count: 0,
            last_correct_time: 0.0,
            next_review_due: 0.0,
        }
    }

    pub fn on_correct(&mut self, now: f64) {
        let now = now.max(0.0);
        self.correct_streak += 1;
        self.last_correct_time = now;
        self.next_review_due = now + review_interval(self.correct_streak);

        // a run of correct answers slowly pays back earlier misses
        if self.correct_streak >= 2 {
            self.incorrect_count = self.incorrect_count.saturating_sub(1);
        }
    }

    /// Makes the item due immediately. The streak is left alone.
    pub fn on_incorrect(&mut self, now: f64) {
        self.incorrect_count += 1;
        self.next_review_due = now.max(0.0);
    }

    /// Higher means more urgent.
    pub fn priority(&self, now: f64) -> i64 {
        let incorrect_weight = i64::from(self.incorrect_count) * 10;
        let review_weight = if self.is_due(now) { 5 } else { 0 };
        let well_known_penalty = if self.correct_streak > 3 { -2 } else { 0 };
        incorrect_weight + review_weight + well_known_penalty
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.next_review_due
    }

    pub fn reset(&mut self) {
        self.correct_streak = 0;
        self.incorrect_count = 0;
        self.last_correct_time = 0.0;
        self.next_review_due = 0.0;
    }

    pub fn entry(&self) -> &CorpusEntry {
        &self.entry
    }

    pub fn term(&self) -> &str {
        &self.entry.term
    }

    pub fn translation(&self) -> &str {
        &self.entry.translation
    }

    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn last_correct_time(&self) -> f64 {
        self.last_correct_time
    }

    pub fn next_review_due(&self) -> f64 {
        self.next_review_due
    }
}

impl From<CorpusEntry> for VocabularyItem {
    fn from(entry: CorpusEntry) -> Self {
        VocabularyItem::new(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog() -> VocabularyItem {
        VocabularyItem::new(CorpusEntry::new("dog", "犬"))
    }

    #[test]
    fn test_intervals_follow_forgetting_curve() {
        let mut item = dog();
        let mut now = 3.0;
        let mut gaps = vec![];
        for _ in 0..6 {
            item.on_correct(now);
            gaps.push(item.next_review_due() - item.last_correct_time());
            now += 17.5;
        }
        assert_eq!(gaps, vec![30.0, 120.0, 300.0, 600.0, 600.0, 600.0]);
        assert_eq!(item.correct_streak(), 6);
    }

    #[test]
    fn test_incorrect_is_due_immediately() {
        let mut item = dog();
        item.on_incorrect(10.0);
        assert_eq!(item.incorrect_count(), 1);
        assert_eq!(item.next_review_due(), 10.0);
        assert!(item.is_due(10.0));

        item.on_correct(20.0);
        item.on_incorrect(25.0);
        assert_eq!(item.next_review_due(), 25.0);
        // streak survives a miss
        assert_eq!(item.correct_streak(), 1);
    }

    #[test]
    fn test_priority_of_missed_due_item() {
        let mut item = dog();
        item.on_incorrect(0.0);
        item.on_incorrect(0.0);
        assert_eq!(item.correct_streak(), 0);
        assert_eq!(item.priority(100.0), 2 * 10 + 5);
    }

    #[test]
    fn test_priority_not_due_and_well_known() {
        let mut item = dog();
        for t in [0.0, 1.0, 2.0, 3.0] {
            item.on_correct(t);
        }
        // due at 603, streak 4
        assert_eq!(item.priority(100.0), -2);
        assert_eq!(item.priority(603.0), 3);
    }

    #[test]
    fn test_priority_grows_with_misses() {
        let mut item = dog();
        let mut previous = item.priority(50.0);
        for _ in 0..5 {
            item.on_incorrect(0.0);
            let current = item.priority(50.0);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_correct_streak_pays_back_misses() {
        let mut item = dog();
        item.on_incorrect(0.0);
        item.on_incorrect(0.0);
        item.on_correct(1.0);
        assert_eq!(item.incorrect_count(), 2);
        item.on_correct(2.0);
        assert_eq!(item.incorrect_count(), 1);
        item.on_correct(3.0);
        item.on_correct(4.0);
        assert_eq!(item.incorrect_count(), 0);
    }

    #[test]
    fn test_reset_keeps_text() {
        let mut item = dog();
        item.on_correct(5.0);
        item.on_incorrect(6.0);
        item.reset();
        assert_eq!(item, dog());
    }

    #[test]
    fn test_times_never_negative() {
        let mut item = dog();
        item.on_incorrect(-4.0);
        assert_eq!(item.next_review_due(), 0.0);
    }
}
