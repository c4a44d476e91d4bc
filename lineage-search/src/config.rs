//! Timeline configuration with sensible defaults.
//!
//! [`TimelineConfig`] is passed explicitly into the pipeline, the paper
//! source and the query expander. Nothing is read from the environment here;
//! the host crate is responsible for loading files and env overrides.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Default Semantic Scholar Graph API base URL.
pub const DEFAULT_SOURCE_BASE_URL: &str = "https://api.semanticscholar.org/graph/v1";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com";

/// Default completion model used for query expansion.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Configuration for the academic-search capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the paper search API. `paper/search` is joined onto it.
    pub base_url: String,
    /// Optional API key, sent as `x-api-key`.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent. If `None`, a crate-identifying default is used.
    pub user_agent: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOURCE_BASE_URL.into(),
            api_key: None,
            timeout_seconds: 10,
            user_agent: None,
        }
    }
}

/// Configuration for the LLM completion capability used by query expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: String,
    /// Bearer token. Required unless `allow_keyless` is set.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    /// The endpoint is a proxy that injects credentials itself, so expansion
    /// is available without a key and no `Authorization` header is sent.
    pub allow_keyless: bool,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.into(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.into(),
            temperature: 0.3,
            allow_keyless: false,
            timeout_seconds: 15,
        }
    }
}

impl LlmConfig {
    /// Whether the capability can be called at all.
    ///
    /// A blank key counts as missing.
    pub fn is_available(&self) -> bool {
        self.allow_keyless || self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Configuration for a timeline search.
///
/// Use [`Default::default()`] for the reference behaviour, or construct
/// with field overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub source: SourceConfig,
    /// LLM used for query expansion. `None` disables expansion entirely.
    pub llm: Option<LlmConfig>,
    /// Number of related queries requested from the LLM.
    pub expansion_count: usize,
    /// Maximum papers kept in the final timeline.
    pub max_results: usize,
    /// Papers published before this year are discarded.
    pub min_year: i32,
    /// Width in years of the recent-strategy window.
    pub recent_window_years: i32,
    /// Uncited papers are kept only if published within this many years.
    pub uncited_grace_years: i32,
    /// How many expanded queries are retrieved concurrently. The three
    /// strategies of one query always run concurrently.
    pub query_concurrency: usize,
    /// How long to cache final timelines in seconds. 0 disables caching.
    pub cache_ttl_seconds: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            llm: None,
            expansion_count: 5,
            max_results: 25,
            min_year: 1980,
            recent_window_years: 3,
            uncited_grace_years: 2,
            query_concurrency: 1,
            cache_ttl_seconds: 0,
        }
    }
}

impl TimelineConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results`, `expansion_count` and `query_concurrency` must be > 0
    /// - timeouts must be > 0
    /// - window sizes must not be negative
    /// - base URLs must parse as absolute URLs
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.expansion_count == 0 {
            return Err(SearchError::Config(
                "expansion_count must be greater than 0".into(),
            ));
        }
        if self.query_concurrency == 0 {
            return Err(SearchError::Config(
                "query_concurrency must be greater than 0".into(),
            ));
        }
        if self.recent_window_years < 0 || self.uncited_grace_years < 0 {
            return Err(SearchError::Config(
                "year windows must not be negative".into(),
            ));
        }
        if self.source.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "source timeout_seconds must be greater than 0".into(),
            ));
        }
        parse_base_url(&self.source.base_url)?;
        if let Some(llm) = &self.llm {
            if llm.timeout_seconds == 0 {
                return Err(SearchError::Config(
                    "llm timeout_seconds must be greater than 0".into(),
                ));
            }
            if llm.model.trim().is_empty() {
                return Err(SearchError::Config("llm model must not be empty".into()));
            }
            parse_base_url(&llm.base_url)?;
        }
        Ok(())
    }
}

/// Parse a base URL, normalising it to end with `/` so that relative
/// endpoint paths join beneath it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, SearchError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|e| SearchError::Config(format!("invalid base URL {raw:?}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(SearchError::Config(format!(
            "base URL {raw:?} cannot be a base"
        )));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}
