//! Error types for the mentor-search crate.
//!
//! All errors use stable string messages suitable for display. Discovery
//! itself never fails fatally: these errors describe individual backend
//! calls, which the pipeline logs and skips.

/// Errors that can occur while talking to a search backend.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to the search backend failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse the search backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A backend call exceeded the configured per-query timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// Invalid discovery configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for mentor-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("query exceeded 8s".into());
        assert_eq!(err.to_string(), "search timed out: query exceeded 8s");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("limit_per_concept must be > 0".into());
        assert_eq!(err.to_string(), "config error: limit_per_concept must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
