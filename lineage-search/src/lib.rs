//! # lineage-search
//!
//! Literature-discovery engine: given a research topic, build a
//! chronological timeline of the most influential papers on it.
//!
//! ## Design
//!
//! - An optional OpenAI-compatible LLM rewrites the topic into several
//!   academic queries; any failure falls back to the topic alone
//! - Each query is sent to Semantic Scholar under three strategies
//!   (impact, survey, recent) concurrently
//! - Records are deduplicated by paper id, scored by
//!   `ln(citations + 1) / (age + 1)`, filtered for plausibility, and the
//!   top 25 are returned in chronological order
//! - Graceful degradation: a failed call contributes nothing and the
//!   public entry points return an empty list rather than an error
//!
//! ## Security
//!
//! - API keys are only ever sent as request headers
//! - No network listeners; this is a library, not a server
//! - Query text is logged only at trace level

pub mod cache;
pub mod config;
pub mod error;
pub mod expansion;
pub mod http;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

pub use config::{LlmConfig, SourceConfig, TimelineConfig};
pub use error::{Result, SearchError};
pub use expansion::{IdentityExpander, OpenAiExpander, QueryExpander};
pub use orchestrator::search::{DefaultTimelineSearch, TimelineSearch};
pub use source::PaperSource;
pub use sources::SemanticScholarSource;
pub use types::{CanonicalPaper, RawPaper, SearchOptions, SortMode, Strategy};

/// Build a chronological timeline of influential papers for `query`.
///
/// Constructs the production pipeline from `config` and runs it once.
/// Never fails: configuration or upstream errors are logged and yield an
/// empty list. Reuse a [`DefaultTimelineSearch`] to benefit from caching.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = lineage_search::TimelineConfig::default();
/// let papers = lineage_search::search_timeline("quantum error correction", &config).await;
/// for paper in &papers {
///     println!("{} ({}): {}", paper.title, paper.year, paper.authors);
/// }
/// # }
/// ```
pub async fn search_timeline(query: &str, config: &TimelineConfig) -> Vec<CanonicalPaper> {
    match DefaultTimelineSearch::from_config(config.clone()) {
        Ok(search) => search.search_timeline(query).await,
        Err(err) => {
            tracing::error!(error = %err, "cannot build timeline search");
            Vec::new()
        }
    }
}

/// Find papers related to a known paper title.
///
/// Same pipeline and guarantees as [`search_timeline`], with the title as
/// the query.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = lineage_search::TimelineConfig::default();
/// let related = lineage_search::find_similar("Attention Is All You Need", &config).await;
/// println!("{} related papers", related.len());
/// # }
/// ```
pub async fn find_similar(title: &str, config: &TimelineConfig) -> Vec<CanonicalPaper> {
    search_timeline(title, config).await
}
