//! Error types for WebSift.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Empty content after normalization")]
    EmptyContent,

    #[error("Duplicate content: hash={0}")]
    DuplicateContent(String),

    #[error("Language rejected: {0}")]
    LanguageRejected(String),

    #[error("Quality below threshold: {0}")]
    QualityBelowThreshold(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
