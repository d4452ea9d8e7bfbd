mod commands;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vocab_quiz::{CorpusEntry, QuizConfig, QuizMode};

#[derive(Parser)]
#[command(name = "quiz", about = "Vocabulary review quiz in the terminal", version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModeArg {
    EnglishToJapanese,
    JapaneseToEnglish,
    PhraseEnglishToJapanese,
    PhraseJapaneseToEnglish,
}

impl From<ModeArg> for QuizMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::EnglishToJapanese => QuizMode::EnglishToJapanese,
            ModeArg::JapaneseToEnglish => QuizMode::JapaneseToEnglish,
            ModeArg::PhraseEnglishToJapanese => QuizMode::PhraseEnglishToJapanese,
            ModeArg::PhraseJapaneseToEnglish => QuizMode::PhraseJapaneseToEnglish,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Parse a corpus file and report what was found
    Check {
        /// Corpus CSV file
        corpus: PathBuf,
    },

    /// Play a round in the terminal
    Play {
        /// Corpus CSV file, or a directory holding WordData.csv / PhraseData.csv
        corpus: PathBuf,
        /// Quiz direction and word list (overrides the config file)
        #[arg(long)]
        mode: Option<ModeArg>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play a round with a scripted player and print the report
    Simulate {
        /// Corpus CSV file, or a directory holding WordData.csv / PhraseData.csv
        corpus: PathBuf,
        /// Number of questions to ask
        #[arg(long, default_value = "30")]
        questions: u64,
        /// Chance that the scripted player picks the right answer
        #[arg(long, default_value = "0.7")]
        accuracy: f64,
        /// Seconds the scripted player takes per answer
        #[arg(long, default_value = "2.0")]
        think_time: f64,
        /// Seed for both the quiz and the scripted player
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        mode: Option<ModeArg>,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>, mode: Option<ModeArg>) -> anyhow::Result<QuizConfig> {
    let mut config = match path {
        Some(path) => QuizConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => QuizConfig::default(),
    };
    if let Some(mode) = mode {
        config.mode = mode.into();
    }
    Ok(config)
}

fn load_entries(path: &Path, mode: QuizMode) -> anyhow::Result<Vec<CorpusEntry>> {
    let path = if path.is_dir() {
        path.join(mode.lexicon().default_file_name())
    } else {
        path.to_path_buf()
    };
    let parsed = vocab_utils::load_corpus(&path)?;
    anyhow::ensure!(
        !parsed.entries.is_empty(),
        "{} has no usable rows",
        path.display()
    );
    Ok(parsed.entries)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { corpus } => {
            commands::check::run(&corpus, cli.format)?;
        }
        Command::Play {
            corpus,
            mode,
            config,
        } => {
            let config = load_config(config.as_deref(), mode)?;
            let entries = load_entries(&corpus, config.mode)?;
            commands::play::run(config, entries)?;
        }
        Command::Simulate {
            corpus,
            questions,
            accuracy,
            think_time,
            seed,
            mode,
            config,
        } => {
            let mut config = load_config(config.as_deref(), mode)?;
            let entries = load_entries(&corpus, config.mode)?;
            let seed = seed.or(config.seed).unwrap_or_else(rand::random);
            config.seed = Some(seed);
            commands::simulate::run(
                config,
                entries,
                commands::simulate::Script {
                    questions,
                    accuracy,
                    think_time,
                    seed,
                },
                cli.format,
            )?;
        }
    }

    Ok(())
}
