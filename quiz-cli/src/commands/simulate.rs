use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use vocab_quiz::{CorpusEntry, Question, QuizConfig, simulate_round};

use crate::OutputFormat;

pub struct Script {
    pub questions: u64,
    /// Probability of answering correctly; the rest are wrong picks.
    pub accuracy: f64,
    pub think_time: f64,
    pub seed: u64,
}

fn pick<R: Rng>(question: &Question, accuracy: f64, rng: &mut R) -> Option<usize> {
    if rng.random_bool(accuracy) {
        return Some(question.correct_index);
    }
    let wrong: Vec<usize> = (0..question.choices.len())
        .filter(|i| !question.is_correct(*i))
        .collect();
    if wrong.is_empty() {
        // a single-choice question has no wrong pick; stay silent instead
        None
    } else {
        Some(wrong[rng.random_range(0..wrong.len())])
    }
}

pub fn run(
    config: QuizConfig,
    entries: Vec<CorpusEntry>,
    script: Script,
    format: OutputFormat,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&script.accuracy),
        "accuracy must be between 0 and 1, got {}",
        script.accuracy
    );
    anyhow::ensure!(
        script.think_time.is_finite() && script.think_time >= 0.0,
        "think time must be a non-negative number of seconds"
    );

    log::info!(
        "Simulating {} questions at {:.0}% accuracy with seed {}",
        script.questions,
        script.accuracy * 100.0,
        script.seed
    );
    // offset so the player's stream differs from the quiz's
    let mut rng = ChaCha8Rng::seed_from_u64(script.seed.wrapping_add(1));
    let outcome = simulate_round(
        config,
        entries,
        script.questions,
        script.think_time,
        |question| pick(question, script.accuracy, &mut rng),
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Plain => {
            println!("{}", outcome.report);
            println!("Final power: {}", outcome.final_balance);
            if !outcome.misses.is_empty() {
                println!("Most missed:");
                for (entry, count) in outcome.misses.iter().take(10) {
                    println!("  {} = {}  ({count}x)", entry.term, entry.translation);
                }
            }
        }
    }
    Ok(())
}
