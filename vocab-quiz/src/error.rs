use crate::vocabulary::ItemId;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("the corpus has no entries")]
    EmptyCorpus,

    #[error("need {needed} distinct answers for a question, the corpus has {available}")]
    InsufficientCorpus { needed: usize, available: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no vocabulary item with id {0}")]
    UnknownItem(ItemId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;
