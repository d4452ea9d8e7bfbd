use std::collections::VecDeque;

use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use vocab_utils::CorpusEntry;

use crate::error::{QuizError, Result};
use crate::ledger::IncorrectAnswerLedger;
use crate::questions::{Question, QuestionGenerator};
use crate::vocabulary::{ItemId, VocabularyItem};

/// How items are picked when the retry queue doesn't supply one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionPolicy {
    /// Every item equally likely. `priority` is not consulted.
    #[default]
    Uniform,
    /// Picked with weight `max(priority, 0) + 1`.
    PriorityWeighted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub enabled: bool,
    /// Must be at least 1.
    pub interval: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub id: ItemId,
    pub from_retry_queue: bool,
}

/// Owns the corpus for a round and decides what gets asked next.
#[derive(Clone, Debug)]
pub struct ReviewScheduler {
    items: Vec<VocabularyItem>,
    retry_queue: VecDeque<ItemId>,
    question_count: u64,
    ledger: IncorrectAnswerLedger,
    retry: RetryPolicy,
    selection_policy: SelectionPolicy,
    rng: ChaCha8Rng,
}

impl ReviewScheduler {
    pub fn new(entries: impl IntoIterator<Item = CorpusEntry>) -> Result<Self> {
        let items: Vec<VocabularyItem> = entries.into_iter().map(VocabularyItem::new).collect();
        if items.is_empty() {
            log::error!("Refusing to build a scheduler over an empty corpus");
            return Err(QuizError::EmptyCorpus);
        }
        Ok(Self {
            items,
            retry_queue: VecDeque::new(),
            question_count: 0,
            ledger: IncorrectAnswerLedger::default(),
            retry: RetryPolicy::default(),
            selection_policy: SelectionPolicy::default(),
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            enabled: retry.enabled,
            interval: retry.interval.max(1),
        };
        self
    }

    pub fn with_selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Zeroes every item's history and forgets the retry queue, the ledger and the question counter.
    pub fn start_round(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
        self.retry_queue.clear();
        self.ledger.clear();
        self.question_count = 0;
    }

    /// Swaps in a new corpus (for a mode switch). Implies `start_round`.
    pub fn replace_corpus(&mut self, entries: impl IntoIterator<Item = CorpusEntry>) -> Result<()> {
        let items: Vec<VocabularyItem> = entries.into_iter().map(VocabularyItem::new).collect();
        if items.is_empty() {
            return Err(QuizError::EmptyCorpus);
        }
        self.items = items;
        self.start_round();
        Ok(())
    }

    /// Counts a new question and picks its item. Every `retry.interval`-th question comes from the
    /// front of the retry queue when the queue is non-empty.
    pub fn select_next(&mut self, now: f64) -> Result<Selection> {
        if self.items.is_empty() {
            return Err(QuizError::EmptyCorpus);
        }

        self.question_count += 1;

        if self.retry.enabled
            && self.question_count % u64::from(self.retry.interval) == 0
            && let Some(id) = self.retry_queue.pop_front()
        {
            log::debug!(
                "Question {} retries {id} ({} still queued)",
                self.question_count,
                self.retry_queue.len()
            );
            return Ok(Selection {
                id,
                from_retry_queue: true,
            });
        }

        let index = match self.selection_policy {
            SelectionPolicy::Uniform => self.rng.random_range(0..self.items.len()),
            SelectionPolicy::PriorityWeighted => {
                let weights = self
                    .items
                    .iter()
                    .map(|item| item.priority(now).max(0) as u64 + 1);
                let distribution =
                    WeightedIndex::new(weights).map_err(|_| QuizError::EmptyCorpus)?;
                distribution.sample(&mut self.rng)
            }
        };
        log::debug!("Question {} picked #{index}", self.question_count);

        Ok(Selection {
            id: ItemId(index),
            from_retry_queue: false,
        })
    }

    /// Applies an answer. Misses (wrong choice or timeout) are tallied in the ledger and queued for a
    /// retry unless the item is already waiting in the queue.
    pub fn record_answer(&mut self, id: ItemId, outcome: AnswerOutcome, now: f64) -> Result<()> {
        let item = self
            .items
            .get_mut(id.0)
            .ok_or(QuizError::UnknownItem(id))?;

        match outcome {
            AnswerOutcome::Correct => item.on_correct(now),
            AnswerOutcome::Incorrect | AnswerOutcome::TimedOut => {
                item.on_incorrect(now);
                self.ledger.record_miss(id);
                if self.retry.enabled && !self.retry_queue.contains(&id) {
                    self.retry_queue.push_back(id);
                }
            }
        }
        Ok(())
    }

    pub fn build_question(
        &mut self,
        generator: &QuestionGenerator,
        id: ItemId,
    ) -> Result<Question> {
        generator.build_question(id, &self.items, &mut self.rng)
    }

    pub fn item(&self, id: ItemId) -> Option<&VocabularyItem> {
        self.items.get(id.0)
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn question_count(&self) -> u64 {
        self.question_count
    }

    pub fn retry_queue(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.retry_queue.iter().copied()
    }

    pub fn ledger(&self) -> &IncorrectAnswerLedger {
        &self.ledger
    }

    /// The ledger, most-missed first, resolved to items.
    pub fn missed_items(&self) -> Vec<(&VocabularyItem, u32)> {
        self.ledger
            .sorted_descending()
            .into_iter()
            .filter_map(|(id, count)| self.item(id).map(|item| (item, count)))
            .collect()
    }
}
