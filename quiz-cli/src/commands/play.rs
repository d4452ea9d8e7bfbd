use std::io::{BufRead, Write};
use std::time::Instant;

use itertools::Itertools;
use vocab_quiz::{AnswerOutcome, CorpusEntry, Phase, QuizConfig, QuizSession};

enum Input {
    Choice(usize),
    Quit,
    Invalid,
}

fn parse_input(line: &str, choice_count: usize) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Input::Quit;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=choice_count).contains(&n) => Input::Choice(n - 1),
        _ => Input::Invalid,
    }
}

/// Interactive round. The session clock follows wall time, sampled whenever the player presses enter.
pub fn run(config: QuizConfig, entries: Vec<CorpusEntry>) -> anyhow::Result<()> {
    let mut session = QuizSession::new(config, entries)?;
    session.wallet_mut().subscribe(|change| {
        log::debug!("Power {} -> {}", change.previous, change.current);
    });

    println!(
        "{} ({} entries). Answer with the choice number, or q to stop.",
        session.config().mode,
        session.scheduler().len()
    );
    session.start_round()?;

    let mut lines = std::io::stdin().lock().lines();
    let mut clock = Instant::now();

    'round: loop {
        let Some(question) = session.current_question() else {
            break;
        };
        let choice_count = question.choices.len();
        let retry_marker = if question.from_retry_queue { " (again)" } else { "" };
        println!();
        println!(
            "Q{}{retry_marker}: {}",
            session.scheduler().question_count(),
            question.prompt
        );
        println!(
            "  {}",
            question
                .choices
                .iter()
                .enumerate()
                .map(|(i, choice)| format!("{}) {choice}", i + 1))
                .join("   ")
        );

        let feedback = loop {
            if let Some(remaining) = session.remaining_time() {
                print!("[{remaining:.0}s] > ");
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next().transpose()? else {
                break 'round;
            };
            let now = Instant::now();
            session.tick(now.duration_since(clock).as_secs_f64())?;
            clock = now;

            match parse_input(&line, choice_count) {
                Input::Quit => break 'round,
                Input::Invalid if session.remaining_time().is_some() => {
                    println!("Pick a number from 1 to {choice_count}.");
                }
                Input::Invalid => break None,
                Input::Choice(index) => break session.submit_answer(index)?,
            }
        };

        match (feedback, session.phase()) {
            (Some(feedback), _) if feedback.outcome == AnswerOutcome::Correct => {
                println!(
                    "Correct! +{} power ({} total)",
                    feedback.reward,
                    session.wallet().balance()
                );
            }
            (Some(feedback), _) => println!("Wrong. The answer was {}", feedback.correct_answer),
            (
                None,
                Phase::Resolved {
                    outcome: AnswerOutcome::TimedOut,
                    ..
                },
            ) => {
                if let Some(question) = session.current_question() {
                    println!("Time over! The answer was {}", question.correct_answer());
                }
            }
            (None, _) => {}
        }

        // the reveal lasts until the player answers the next prompt
        session.next_question()?;
        clock = Instant::now();
    }
    session.stop();

    println!();
    println!("{}", session.report());
    println!("Power: {}", session.wallet().balance());

    let missed = session.missed_items();
    if !missed.is_empty() {
        println!("Review these:");
        for (item, count) in missed {
            println!("  {} = {}  (missed {count}x)", item.term(), item.translation());
        }
    }
    Ok(())
}
