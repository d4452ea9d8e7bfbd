use std::path::Path;

use serde::{Deserialize, Serialize};
use vocab_utils::QuizMode;

use crate::error::{QuizError, Result};
use crate::questions::ShortCorpusPolicy;
use crate::scheduler::SelectionPolicy;

/// Tunables for one quiz session. Every field has a default, so a config file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizConfig {
    pub mode: QuizMode,

    /// Seconds the player has to pick a choice.
    pub answer_time_limit: f64,
    /// Seconds the correct answer stays up after an explicit answer.
    pub answer_reveal_secs: f64,
    /// Seconds the correct answer stays up after the timer ran out.
    pub timeout_reveal_secs: f64,
    /// Power earned per second left on the timer when answering correctly.
    pub power_reward_multiplier: f64,

    pub retry_enabled: bool,
    /// Every `retry_interval`-th question is taken from the retry queue, if it has anything in it.
    pub retry_interval: u32,

    pub choice_count: usize,
    pub selection_policy: SelectionPolicy,
    pub short_corpus_policy: ShortCorpusPolicy,

    pub initial_money: u32,
    /// `None` or zero means no cap.
    pub max_money: Option<u32>,

    /// Fixes the random stream, for reproducible rounds.
    pub seed: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            mode: QuizMode::default(),
            answer_time_limit: 10.0,
            answer_reveal_secs: 1.5,
            timeout_reveal_secs: 5.0,
            power_reward_multiplier: 10.0,
            retry_enabled: true,
            retry_interval: 3,
            choice_count: 3,
            selection_policy: SelectionPolicy::default(),
            short_corpus_policy: ShortCorpusPolicy::default(),
            initial_money: 100,
            max_money: None,
            seed: None,
        }
    }
}

impl QuizConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: QuizConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).inspect_err(|e| {
            log::error!("Could not read config file {}: {e}", path.display());
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.answer_time_limit.is_finite() && self.answer_time_limit > 0.0) {
            return Err(QuizError::InvalidConfig(format!(
                "answerTimeLimit must be a positive number of seconds, got {}",
                self.answer_time_limit
            )));
        }
        for (name, value) in [
            ("answerRevealSecs", self.answer_reveal_secs),
            ("timeoutRevealSecs", self.timeout_reveal_secs),
            ("powerRewardMultiplier", self.power_reward_multiplier),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(QuizError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.retry_interval == 0 {
            return Err(QuizError::InvalidConfig(
                "retryInterval must be at least 1".to_string(),
            ));
        }
        if self.choice_count == 0 {
            return Err(QuizError::InvalidConfig(
                "choiceCount must be at least 1".to_string(),
            ));
        }
        if let Some(max) = self.max_money
            && max > 0
            && self.initial_money > max
        {
            log::warn!(
                "initialMoney {} is above maxMoney {max}; it will be capped",
                self.initial_money
            );
        }
        Ok(())
    }
}
