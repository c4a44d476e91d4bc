//! Error types for the lineage-search crate.
//!
//! All errors use stable string messages suitable for logging. No API keys
//! or query text appear in error messages.

/// Errors that can occur while building a discovery timeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Every paper-source request issued for a timeline failed.
    #[error("all paper source requests failed: {0}")]
    AllRequestsFailed(String),

    /// A request did not complete within its time budget.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// An HTTP request to an upstream service failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An upstream response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The LLM completion capability failed or is unavailable.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for lineage-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
