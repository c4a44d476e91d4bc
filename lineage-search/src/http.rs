//! Shared HTTP client construction for upstream API requests.

use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent when no custom one is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("lineage-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for JSON API calls.
///
/// The client has:
/// - Timeout of `timeout_seconds` per request
/// - The given User-Agent, or [`DEFAULT_USER_AGENT`]
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(
    timeout_seconds: u64,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, SearchError> {
    let ua = user_agent.unwrap_or(DEFAULT_USER_AGENT).to_owned();

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Map a [`reqwest::Error`] to a [`SearchError`], keeping timeouts distinct.
pub fn classify_error(context: &str, err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(format!("{context}: {err}"))
    } else if err.is_decode() {
        SearchError::Parse(format!("{context}: {err}"))
    } else {
        SearchError::Http(format!("{context}: {err}"))
    }
}
