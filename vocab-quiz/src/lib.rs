//! The quiz core of a vocabulary game.
//!
//! A `ReviewScheduler` picks the next item to ask, bringing missed items back on a fixed cadence and
//! pushing well-known items further out on a forgetting curve. A `QuestionGenerator` turns an item
//! into a multiple-choice question. A `QuizSession` ties them to a clock and a `Wallet`, and is
//! driven by a host calling `tick` and `submit_answer`.

mod config;
mod error;
mod ledger;
mod questions;
mod report;
mod scheduler;
mod session;
mod simulation;
mod vocabulary;
mod wallet;

pub use config::QuizConfig;
pub use error::{QuizError, Result};
pub use ledger::IncorrectAnswerLedger;
pub use questions::{Question, QuestionGenerator, ShortCorpusPolicy};
pub use report::RoundReport;
pub use scheduler::{AnswerOutcome, RetryPolicy, ReviewScheduler, Selection, SelectionPolicy};
pub use session::{AnswerFeedback, Phase, QuizEvent, QuizSession};
pub use simulation::{SimulationOutcome, simulate_round};
pub use vocabulary::{ItemId, VocabularyItem, review_interval};
pub use wallet::{BalanceChanged, Wallet};

pub use herald::data_model::{ListenerKey, Timestamped};
pub use vocab_utils::{CorpusEntry, Direction, Lexicon, QuizMode};
