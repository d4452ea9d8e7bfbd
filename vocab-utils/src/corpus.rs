use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub term: String,
    pub translation: String,
}

impl CorpusEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for CorpusEntry {
    fn from((term, translation): (T, U)) -> Self {
        CorpusEntry::new(term, translation)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCorpus {
    pub entries: Vec<CorpusEntry>,
    pub had_header: bool,
    /// Non-blank rows that were dropped because they had fewer than two fields or an empty side.
    pub skipped_rows: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("could not read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn is_header(line: &str) -> bool {
    let first_field = line.split(',').next().unwrap_or_default().to_lowercase();
    first_field.contains("english") || first_field.contains("japanese")
}

/// Parses `term,translation` rows. Blank lines are ignored, and so are rows that don't have two non-empty fields.
/// Fields past the second are ignored. There is no quoting: a comma always separates fields.
pub fn parse_corpus(text: &str) -> ParsedCorpus {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    let had_header = lines.next_if(|line| is_header(line)).is_some();

    let mut parsed = ParsedCorpus {
        had_header,
        ..Default::default()
    };

    for (row, line) in lines.enumerate() {
        let mut fields = line.split(',').map(str::trim);
        match (fields.next(), fields.next()) {
            (Some(term), Some(translation)) if !term.is_empty() && !translation.is_empty() => {
                parsed.entries.push(CorpusEntry::new(term, translation));
            }
            _ => {
                log::debug!("Skipping malformed corpus row {row}: {line:?}");
                parsed.skipped_rows += 1;
            }
        }
    }

    parsed
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<ParsedCorpus, CorpusError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_corpus(&text);
    log::info!(
        "Loaded {} entries from {} ({} rows skipped)",
        parsed.entries.len(),
        path.display(),
        parsed.skipped_rows
    );
    Ok(parsed)
}
