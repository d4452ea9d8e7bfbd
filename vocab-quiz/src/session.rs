use herald::data_model::{EventLog, ListenerKey, Listeners, Timestamped};
use serde::Serialize;
use vocab_utils::{CorpusEntry, QuizMode};

use crate::config::QuizConfig;
use crate::error::Result;
use crate::questions::{Question, QuestionGenerator};
use crate::report::RoundReport;
use crate::scheduler::{AnswerOutcome, RetryPolicy, ReviewScheduler};
use crate::vocabulary::{ItemId, VocabularyItem};
use crate::wallet::Wallet;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// No round running yet (or the mode was just switched).
    Idle,
    AwaitingAnswer { remaining: f64 },
    /// The answer is being shown; the next question comes once `until_next` runs out.
    Resolved {
        outcome: AnswerOutcome,
        until_next: f64,
    },
    Stopped,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuizEvent {
    #[serde(rename_all = "camelCase")]
    RoundStarted { mode: QuizMode, corpus_size: usize },
    #[serde(rename_all = "camelCase")]
    QuestionPresented {
        item: ItemId,
        number: u64,
        from_retry_queue: bool,
    },
    #[serde(rename_all = "camelCase")]
    AnswerResolved {
        item: ItemId,
        outcome: AnswerOutcome,
        reward: u32,
    },
    RoundStopped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnswerFeedback {
    pub item: ItemId,
    pub outcome: AnswerOutcome,
    pub reward: u32,
    pub correct_answer: String,
}

/// One player's quiz round. The host drives it with `tick` (time passing) and `submit_answer`.
///
/// Only one question is ever awaiting an answer. Answers that arrive in any other phase are ignored.
#[derive(Debug)]
pub struct QuizSession {
    config: QuizConfig,
    scheduler: ReviewScheduler,
    generator: QuestionGenerator,
    wallet: Wallet,
    phase: Phase,
    current: Option<Question>,
    elapsed: f64,
    events: EventLog<QuizEvent>,
    listeners: Listeners<Timestamped<QuizEvent>>,
}

impl QuizSession {
    pub fn new(config: QuizConfig, entries: Vec<CorpusEntry>) -> Result<Self> {
        config.validate()?;

        let mut scheduler = ReviewScheduler::new(entries)?
            .with_retry(RetryPolicy {
                enabled: config.retry_enabled,
                interval: config.retry_interval,
            })
            .with_selection_policy(config.selection_policy);
        if let Some(seed) = config.seed {
            scheduler = scheduler.with_seed(seed);
        }

        let generator = QuestionGenerator::new(config.mode.direction())
            .with_choice_count(config.choice_count)
            .with_short_corpus_policy(config.short_corpus_policy);
        let wallet = Wallet::new(config.initial_money, config.max_money);

        Ok(Self {
            config,
            scheduler,
            generator,
            wallet,
            phase: Phase::Idle,
            current: None,
            elapsed: 0.0,
            events: EventLog::default(),
            listeners: Listeners::default(),
        })
    }

    /// Starts (or restarts) a round: forgets all history and presents the first question.
    pub fn start_round(&mut self) -> Result<&Question> {
        self.scheduler.start_round();
        self.events.clear();
        self.elapsed = 0.0;
        self.current = None;

        log::info!(
            "Starting a {} round over {} entries",
            self.config.mode,
            self.scheduler.len()
        );
        self.emit(QuizEvent::RoundStarted {
            mode: self.config.mode,
            corpus_size: self.scheduler.len(),
        });

        self.present_next()
    }

    /// Advances the session clock by `dt` seconds. Each call makes at most one phase transition; time
    /// left over after a transition is not carried into the next phase.
    pub fn tick(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Ok(());
        }

        match self.phase {
            Phase::Idle | Phase::Stopped => {}
            Phase::AwaitingAnswer { remaining } => {
                self.elapsed += dt;
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.resolve(AnswerOutcome::TimedOut, 0.0)?;
                } else {
                    self.phase = Phase::AwaitingAnswer { remaining };
                }
            }
            Phase::Resolved {
                outcome,
                until_next,
            } => {
                self.elapsed += dt;
                let until_next = until_next - dt;
                if until_next <= 0.0 {
                    self.present_next()?;
                } else {
                    self.phase = Phase::Resolved {
                        outcome,
                        until_next,
                    };
                }
            }
        }
        Ok(())
    }

    /// Returns `None`, and changes nothing, unless a question is awaiting an answer and
    /// `choice_index` is one of its choices.
    pub fn submit_answer(&mut self, choice_index: usize) -> Result<Option<AnswerFeedback>> {
        let Phase::AwaitingAnswer { remaining } = self.phase else {
            log::debug!("Ignoring answer {choice_index} while {:?}", self.phase);
            return Ok(None);
        };
        let Some(question) = &self.current else {
            return Ok(None);
        };
        if choice_index >= question.choices.len() {
            log::warn!(
                "Ignoring answer {choice_index}: the question only has {} choices",
                question.choices.len()
            );
            return Ok(None);
        }

        let outcome = if question.is_correct(choice_index) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        };
        self.resolve(outcome, remaining)
    }

    /// Skips the rest of the answer reveal. Does nothing outside the `Resolved` phase.
    pub fn next_question(&mut self) -> Result<Option<&Question>> {
        if !matches!(self.phase, Phase::Resolved { .. }) {
            return Ok(None);
        }
        self.present_next().map(Some)
    }

    pub fn stop(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Stopped) {
            return;
        }
        self.phase = Phase::Stopped;
        self.current = None;
        log::info!("Round stopped after {:.1}s", self.elapsed);
        self.emit(QuizEvent::RoundStopped);
    }

    /// Switches direction and corpus. The session goes back to `Idle`; call `start_round` to play.
    pub fn set_mode(&mut self, mode: QuizMode, entries: Vec<CorpusEntry>) -> Result<()> {
        self.scheduler.replace_corpus(entries)?;
        self.generator.set_direction(mode.direction());
        self.config.mode = mode;
        self.phase = Phase::Idle;
        self.current = None;
        self.events.clear();
        self.elapsed = 0.0;
        log::info!("Switched to {mode} with {} entries", self.scheduler.len());
        Ok(())
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Timestamped<QuizEvent>) + 'static,
    ) -> ListenerKey {
        self.listeners
            .register_listener(move |_, event| listener(event))
    }

    pub fn unsubscribe(&mut self, key: ListenerKey) -> bool {
        self.listeners.unregister_listener(key)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Seconds left to answer the current question.
    pub fn remaining_time(&self) -> Option<f64> {
        match self.phase {
            Phase::AwaitingAnswer { remaining } => Some(remaining),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &ReviewScheduler {
        &self.scheduler
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    pub fn events(&self) -> &EventLog<QuizEvent> {
        &self.events
    }

    pub fn report(&self) -> RoundReport {
        self.events.state(RoundReport::default())
    }

    pub fn missed_items(&self) -> Vec<(&VocabularyItem, u32)> {
        self.scheduler.missed_items()
    }

    fn present_next(&mut self) -> Result<&Question> {
        let selection = self.scheduler.select_next(self.elapsed)?;
        let mut question = self
            .scheduler
            .build_question(&self.generator, selection.id)?;
        question.from_retry_queue = selection.from_retry_queue;

        self.phase = Phase::AwaitingAnswer {
            remaining: self.config.answer_time_limit,
        };
        self.emit(QuizEvent::QuestionPresented {
            item: selection.id,
            number: self.scheduler.question_count(),
            from_retry_queue: selection.from_retry_queue,
        });
        Ok(&*self.current.insert(question))
    }

    fn resolve(
        &mut self,
        outcome: AnswerOutcome,
        remaining: f64,
    ) -> Result<Option<AnswerFeedback>> {
        let Some(question) = &self.current else {
            log::error!("Tried to resolve {outcome:?} with no question on screen");
            return Ok(None);
        };
        let item = question.item;
        let correct_answer = question.correct_answer().to_string();

        self.scheduler.record_answer(item, outcome, self.elapsed)?;

        let reward = if outcome.is_correct() {
            (remaining.max(0.0) * self.config.power_reward_multiplier).round_ties_even() as u32
        } else {
            0
        };
        self.wallet.add(reward);

        let until_next = match outcome {
            AnswerOutcome::TimedOut => self.config.timeout_reveal_secs,
            AnswerOutcome::Correct | AnswerOutcome::Incorrect => self.config.answer_reveal_secs,
        };
        self.phase = Phase::Resolved {
            outcome,
            until_next,
        };
        self.emit(QuizEvent::AnswerResolved {
            item,
            outcome,
            reward,
        });

        Ok(Some(AnswerFeedback {
            item,
            outcome,
            reward,
            correct_answer,
        }))
    }

    fn emit(&mut self, event: QuizEvent) {
        let event = self.events.push(self.elapsed, event);
        self.listeners.notify(event);
    }
}
