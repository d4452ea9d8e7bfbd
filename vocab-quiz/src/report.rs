use herald::AppState;
use herald::data_model::Timestamped;
use serde::Serialize;
use vocab_utils::QuizMode;

use crate::scheduler::AnswerOutcome;
use crate::session::QuizEvent;

/// Round statistics, rebuilt from the session's event log.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub mode: Option<QuizMode>,
    pub corpus_size: usize,
    pub questions_asked: u64,
    pub retries_asked: u64,
    pub correct: u64,
    pub incorrect: u64,
    pub timed_out: u64,
    pub power_earned: u64,
    pub duration_secs: f64,
    pub stopped: bool,
}

impl RoundReport {
    pub fn answered(&self) -> u64 {
        self.correct + self.incorrect + self.timed_out
    }

    /// `None` until something has been answered.
    pub fn accuracy(&self) -> Option<f64> {
        let answered = self.answered();
        (answered > 0).then(|| self.correct as f64 / answered as f64)
    }
}

impl AppState for RoundReport {
    type Event = QuizEvent;

    fn apply_event(mut self, event: &Timestamped<QuizEvent>) -> Self {
        self.duration_secs = self.duration_secs.max(event.elapsed_secs);

        match &event.event {
            QuizEvent::RoundStarted { mode, corpus_size } => {
                self = RoundReport {
                    mode: Some(*mode),
                    corpus_size: *corpus_size,
                    ..Default::default()
                };
            }
            QuizEvent::QuestionPresented {
                from_retry_queue, ..
            } => {
                self.questions_asked += 1;
                if *from_retry_queue {
                    self.retries_asked += 1;
                }
            }
            QuizEvent::AnswerResolved {
                outcome, reward, ..
            } => {
                match outcome {
                    AnswerOutcome::Correct => self.correct += 1,
                    AnswerOutcome::Incorrect => self.incorrect += 1,
                    AnswerOutcome::TimedOut => self.timed_out += 1,
                }
                self.power_earned += u64::from(*reward);
            }
            QuizEvent::RoundStopped => self.stopped = true,
        }

        self
    }
}

impl std::fmt::Display for RoundReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(mode) = self.mode {
            writeln!(f, "Mode: {mode} ({} entries)", self.corpus_size)?;
        }
        writeln!(
            f,
            "Questions: {} ({} retries)",
            self.questions_asked, self.retries_asked
        )?;
        writeln!(
            f,
            "Correct: {}  Wrong: {}  Time over: {}",
            self.correct, self.incorrect, self.timed_out
        )?;
        match self.accuracy() {
            Some(accuracy) => writeln!(f, "Accuracy: {:.1}%", accuracy * 100.0)?,
            None => writeln!(f, "Accuracy: -")?,
        }
        write!(
            f,
            "Power earned: {}  Time: {:.1}s",
            self.power_earned, self.duration_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ItemId;
    use herald::data_model::EventLog;

    #[test]
    fn test_fold_counts_outcomes() {
        let mut log = EventLog::default();
        log.push(
            0.0,
            QuizEvent::RoundStarted {
                mode: QuizMode::EnglishToJapanese,
                corpus_size: 3,
            },
        );
        log.push(
            0.0,
            QuizEvent::QuestionPresented {
                item: ItemId(0),
                number: 1,
                from_retry_queue: false,
            },
        );
        log.push(
            2.0,
            QuizEvent::AnswerResolved {
                item: ItemId(0),
                outcome: AnswerOutcome::Correct,
                reward: 80,
            },
        );
        log.push(
            3.5,
            QuizEvent::QuestionPresented {
                item: ItemId(1),
                number: 2,
                from_retry_queue: true,
            },
        );
        log.push(
            13.5,
            QuizEvent::AnswerResolved {
                item: ItemId(1),
                outcome: AnswerOutcome::TimedOut,
                reward: 0,
            },
        );

        let report = log.state(RoundReport::default());
        assert_eq!(report.mode, Some(QuizMode::EnglishToJapanese));
        assert_eq!(report.questions_asked, 2);
        assert_eq!(report.retries_asked, 1);
        assert_eq!(report.correct, 1);
        assert_eq!(report.timed_out, 1);
        assert_eq!(report.power_earned, 80);
        assert_eq!(report.duration_secs, 13.5);
        assert_eq!(report.accuracy(), Some(0.5));
        assert!(!report.stopped);
    }

    #[test]
    fn test_accuracy_undefined_without_answers() {
        assert_eq!(RoundReport::default().accuracy(), None);
    }
}
