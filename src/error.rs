//! Error types for the mentor assistant.

use mentor_search::SearchError;

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    /// Language model request or response error.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Resource discovery configuration error.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// An operation that needs an analyzed task was called too early.
    #[error("no task has been analyzed yet")]
    NoAnalysis,

    /// REST API server error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MentorError>;
