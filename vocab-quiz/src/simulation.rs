use serde::Serialize;
use vocab_utils::CorpusEntry;

use crate::config::QuizConfig;
use crate::error::{QuizError, Result};
use crate::questions::Question;
use crate::report::RoundReport;
use crate::session::{Phase, QuizSession};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub report: RoundReport,
    /// Missed entries, most missed first.
    pub misses: Vec<(CorpusEntry, u32)>,
    pub final_balance: u32,
}

/// Play a round of `questions` questions without a player.
///
/// `answerer` is shown each question and picks a choice, or returns `None` to let the timer run out.
/// Every answer takes `think_time` seconds; answers slower than the time limit count as timeouts.
/// Reveal delays are waited out in full.
pub fn simulate_round<F>(
    config: QuizConfig,
    entries: Vec<CorpusEntry>,
    questions: u64,
    think_time: f64,
    mut answerer: F,
) -> Result<SimulationOutcome>
where
    F: FnMut(&Question) -> Option<usize>,
{
    if questions == 0 {
        return Err(QuizError::InvalidConfig(
            "a simulated round needs at least one question".to_string(),
        ));
    }

    let time_limit = config.answer_time_limit;
    let mut session = QuizSession::new(config, entries)?;
    session.start_round()?;

    for number in 1..=questions {
        let Some(question) = session.current_question() else {
            break;
        };
        match answerer(question) {
            Some(choice) => {
                session.tick(think_time)?;
                session.submit_answer(choice)?;
            }
            None => session.tick(time_limit)?,
        }

        if number == questions {
            break;
        }
        match session.phase() {
            Phase::Resolved { until_next, .. } if until_next > 0.0 => session.tick(until_next)?,
            Phase::Resolved { .. } => {
                session.next_question()?;
            }
            phase => {
                log::warn!("Simulation stuck in {phase:?} after question {number}");
                break;
            }
        }
    }
    session.stop();

    let report = session.report();
    log::debug!("Simulated round: {report}");
    let misses = session
        .missed_items()
        .into_iter()
        .map(|(item, count)| (item.entry().clone(), count))
        .collect();

    Ok(SimulationOutcome {
        report,
        misses,
        final_balance: session.wallet().balance(),
    })
}
