mod corpus;

pub use corpus::{CorpusError, CorpusEntry, ParsedCorpus, load_corpus, parse_corpus};

use serde::{Deserialize, Serialize};

/// Which side of a corpus row is shown as the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Show the term (English), answer with the translation (Japanese).
    TermToTranslation,
    /// Show the translation, answer with the term.
    TranslationToTerm,
}

impl Direction {
    pub fn prompt<'a>(&self, entry: &'a CorpusEntry) -> &'a str {
        match self {
            Direction::TermToTranslation => &entry.term,
            Direction::TranslationToTerm => &entry.translation,
        }
    }

    pub fn answer<'a>(&self, entry: &'a CorpusEntry) -> &'a str {
        match self {
            Direction::TermToTranslation => &entry.translation,
            Direction::TranslationToTerm => &entry.term,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lexicon {
    Words,
    Phrases,
}

impl Lexicon {
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Lexicon::Words => "WordData.csv",
            Lexicon::Phrases => "PhraseData.csv",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizMode {
    #[default]
    EnglishToJapanese,
    JapaneseToEnglish,
    PhraseEnglishToJapanese,
    PhraseJapaneseToEnglish,
}

impl QuizMode {
    pub fn direction(&self) -> Direction {
        match self {
            QuizMode::EnglishToJapanese | QuizMode::PhraseEnglishToJapanese => {
                Direction::TermToTranslation
            }
            QuizMode::JapaneseToEnglish | QuizMode::PhraseJapaneseToEnglish => {
                Direction::TranslationToTerm
            }
        }
    }

    pub fn lexicon(&self) -> Lexicon {
        match self {
            QuizMode::EnglishToJapanese | QuizMode::JapaneseToEnglish => Lexicon::Words,
            QuizMode::PhraseEnglishToJapanese | QuizMode::PhraseJapaneseToEnglish => {
                Lexicon::Phrases
            }
        }
    }
}

impl std::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QuizMode::EnglishToJapanese => "English → Japanese",
            QuizMode::JapaneseToEnglish => "Japanese → English",
            QuizMode::PhraseEnglishToJapanese => "Phrase English → Japanese",
            QuizMode::PhraseJapaneseToEnglish => "Phrase Japanese → English",
        };
        write!(f, "{name}")
    }
}
