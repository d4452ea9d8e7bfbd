use itertools::Itertools;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use vocab_utils::Direction;

use crate::error::{QuizError, Result};
use crate::vocabulary::{ItemId, VocabularyItem};

/// What to do when the corpus has too few distinct answers to fill a choice set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortCorpusPolicy {
    /// Fill the remaining slots with copies of the correct answer.
    #[default]
    PadWithCorrect,
    /// Return `QuizError::InsufficientCorpus`.
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub item: ItemId,
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub from_retry_queue: bool,
}

impl Question {
    pub fn correct_answer(&self) -> &str {
        &self.choices[self.correct_index]
    }

    /// Only `correct_index` counts. In a padded set the other copies of the answer are misses.
    pub fn is_correct(&self, choice_index: usize) -> bool {
        choice_index == self.correct_index
    }
}

#[derive(Clone, Debug)]
pub struct QuestionGenerator {
    direction: Direction,
    choice_count: usize,
    short_corpus_policy: ShortCorpusPolicy,
}

impl QuestionGenerator {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            choice_count: 3,
            short_corpus_policy: ShortCorpusPolicy::default(),
        }
    }

    pub fn with_choice_count(mut self, choice_count: usize) -> Self {
        self.choice_count = choice_count.max(1);
        self
    }

    pub fn with_short_corpus_policy(mut self, policy: ShortCorpusPolicy) -> Self {
        self.short_corpus_policy = policy;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn choice_count(&self) -> usize {
        self.choice_count
    }

    pub fn prompt<'a>(&self, item: &'a VocabularyItem) -> &'a str {
        self.direction.prompt(item.entry())
    }

    pub fn answer<'a>(&self, item: &'a VocabularyItem) -> &'a str {
        self.direction.answer(item.entry())
    }

    /// One correct answer plus `choice_count - 1` distinct distractors taken from the other
    /// answers in the corpus, in random order.
    pub fn build_choices<R: Rng + ?Sized>(
        &self,
        target: &VocabularyItem,
        corpus: &[VocabularyItem],
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let correct = self.answer(target);
        let distractor_pool: Vec<&str> = corpus
            .iter()
            .map(|item| self.answer(item))
            .filter(|answer| *answer != correct)
            .unique()
            .collect();

        let wanted = self.choice_count - 1;
        if distractor_pool.len() < wanted {
            match self.short_corpus_policy {
                ShortCorpusPolicy::Fail => {
                    return Err(QuizError::InsufficientCorpus {
                        needed: self.choice_count,
                        available: distractor_pool.len() + 1,
                    });
                }
                ShortCorpusPolicy::PadWithCorrect => {
                    log::warn!(
                        "Only {} distinct answers for {} choices; padding with {correct:?}",
                        distractor_pool.len() + 1,
                        self.choice_count
                    );
                }
            }
        }

        let mut choices = Vec::with_capacity(self.choice_count);
        choices.push(correct.to_string());
        choices.extend(
            distractor_pool
                .choose_multiple(rng, wanted)
                .map(|answer| answer.to_string()),
        );
        while choices.len() < self.choice_count {
            choices.push(correct.to_string());
        }
        choices.shuffle(rng);
        Ok(choices)
    }

    pub fn build_question<R: Rng + ?Sized>(
        &self,
        id: ItemId,
        corpus: &[VocabularyItem],
        rng: &mut R,
    ) -> Result<Question> {
        let target = corpus.get(id.0).ok_or(QuizError::UnknownItem(id))?;
        let choices = self.build_choices(target, corpus, rng)?;
        let correct = self.answer(target);
        // the correct answer is always among the choices
        let correct_index = choices
            .iter()
            .position(|choice| choice == correct)
            .unwrap_or_default();

        Ok(Question {
            item: id,
            prompt: self.prompt(target).to_string(),
            choices,
            correct_index,
            from_retry_queue: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;
    use vocab_utils::CorpusEntry;

    fn items(pairs: &[(&str, &str)]) -> Vec<VocabularyItem> {
        pairs
            .iter()
            .map(|pair| VocabularyItem::new(CorpusEntry::from(*pair)))
            .collect()
    }

    fn animals() -> Vec<VocabularyItem> {
        items(&[("dog", "犬"), ("cat", "猫"), ("bird", "鳥")])
    }

    #[test]
    fn test_three_item_corpus_uses_every_translation() {
        let corpus = animals();
        let generator = QuestionGenerator::new(Direction::TermToTranslation);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..20 {
            let choices = generator.build_choices(&corpus[0], &corpus, &mut rng).unwrap();
            assert_eq!(choices.len(), 3);
            let set: BTreeSet<&str> = choices.iter().map(String::as_str).collect();
            assert_eq!(set, BTreeSet::from(["犬", "猫", "鳥"]));
        }
    }

    #[test]
    fn test_order_is_shuffled() {
        let corpus = animals();
        let generator = QuestionGenerator::new(Direction::TermToTranslation);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let positions: BTreeSet<usize> = (0..50)
            .map(|_| {
                generator
                    .build_question(ItemId(0), &corpus, &mut rng)
                    .unwrap()
                    .correct_index
            })
            .collect();
        assert_eq!(positions, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn test_distractors_are_distinct() {
        let corpus = items(&[
            ("dog", "犬"),
            ("hound", "犬"),
            ("cat", "猫"),
            ("kitty", "猫"),
            ("bird", "鳥"),
            ("fish", "魚"),
            ("horse", "馬"),
        ]);
        let generator =
            QuestionGenerator::new(Direction::TermToTranslation).with_choice_count(4);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..30 {
            let question = generator.build_question(ItemId(1), &corpus, &mut rng).unwrap();
            assert_eq!(question.choices.len(), 4);
            assert_eq!(question.correct_answer(), "犬");
            let unique: BTreeSet<&String> = question.choices.iter().collect();
            assert_eq!(unique.len(), 4, "{:?}", question.choices);
        }
    }

    #[test]
    fn test_single_item_pads_with_correct_answer() {
        let corpus = items(&[("dog", "犬")]);
        let generator = QuestionGenerator::new(Direction::TermToTranslation);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let choices = generator.build_choices(&corpus[0], &corpus, &mut rng).unwrap();
        assert_eq!(choices, vec!["犬", "犬", "犬"]);

        let question = generator.build_question(ItemId(0), &corpus, &mut rng).unwrap();
        assert_eq!(question.correct_index, 0);
        assert!(question.is_correct(0));
        assert!(!question.is_correct(1));
        assert!(!question.is_correct(2));
    }

    #[test]
    fn test_single_item_fails_when_asked_to() {
        let corpus = items(&[("dog", "犬")]);
        let generator = QuestionGenerator::new(Direction::TermToTranslation)
            .with_short_corpus_policy(ShortCorpusPolicy::Fail);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert!(matches!(
            generator.build_choices(&corpus[0], &corpus, &mut rng),
            Err(QuizError::InsufficientCorpus {
                needed: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn test_reverse_direction_asks_translation() {
        let corpus = animals();
        let generator = QuestionGenerator::new(Direction::TranslationToTerm);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let question = generator.build_question(ItemId(2), &corpus, &mut rng).unwrap();
        assert_eq!(question.prompt, "鳥");
        assert_eq!(question.correct_answer(), "bird");
        assert!(question.is_correct(question.correct_index));
        assert!(!question.is_correct(question.correct_index + 3));
    }

    #[test]
    fn test_single_choice_is_just_the_answer() {
        let corpus = animals();
        let generator =
            QuestionGenerator::new(Direction::TermToTranslation).with_choice_count(1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let choices = generator.build_choices(&corpus[1], &corpus, &mut rng).unwrap();
        assert_eq!(choices, vec!["猫"]);
    }
}
