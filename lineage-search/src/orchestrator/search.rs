//! Timeline search: expand, retrieve, normalise, score, filter, assemble.
//!
//! [`TimelineSearch`] owns a [`PaperSource`], a [`QueryExpander`] and a
//! validated [`TimelineConfig`]. Callers use [`TimelineSearch::search_timeline`],
//! which never fails; [`TimelineSearch::try_search_timeline`] exposes the
//! underlying error for callers that want it.

use chrono::Datelike;

use crate::cache::{CacheKey, TimelineCache};
use crate::config::TimelineConfig;
use crate::error::SearchError;
use crate::expansion::{expand_or_identity, OpenAiExpander, QueryExpander};
use crate::source::PaperSource;
use crate::sources::SemanticScholarSource;
use crate::types::CanonicalPaper;

use super::dedup::normalize;
use super::filter::{quality_filter, QualityThresholds};
use super::retrieve::retrieve_all;
use super::scoring::score_papers;
use super::timeline::assemble;

/// The production pipeline: Semantic Scholar plus an optional LLM expander.
pub type DefaultTimelineSearch = TimelineSearch<SemanticScholarSource, Option<OpenAiExpander>>;

/// End-to-end literature timeline pipeline.
#[derive(Debug)]
pub struct TimelineSearch<S, E> {
    source: S,
    expander: E,
    config: TimelineConfig,
    cache: Option<TimelineCache>,
    current_year: Option<i32>,
}

impl<S: PaperSource, E: QueryExpander> TimelineSearch<S, E> {
    /// Build a pipeline from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(source: S, expander: E, config: TimelineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let cache = TimelineCache::with_ttl(config.cache_ttl_seconds);
        Ok(Self {
            source,
            expander,
            config,
            cache,
            current_year: None,
        })
    }

    /// Pin the reference year used for recency scoring and filtering.
    /// Without this the UTC calendar year at call time is used.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| chrono::Utc::now().year())
    }

    /// Build a chronological timeline of influential papers for `query`.
    ///
    /// Never fails: any error is logged and yields an empty list.
    pub async fn search_timeline(&self, query: &str) -> Vec<CanonicalPaper> {
        match self.try_search_timeline(query).await {
            Ok(papers) => papers,
            Err(err) => {
                tracing::error!(error = %err, "timeline search failed");
                Vec::new()
            }
        }
    }

    /// Find papers similar to `title`. Identical pipeline, title as query.
    pub async fn find_similar(&self, title: &str) -> Vec<CanonicalPaper> {
        self.search_timeline(title).await
    }

    /// Fallible form of [`search_timeline`](Self::search_timeline).
    ///
    /// A blank query yields `Ok(vec![])` without any upstream call. When
    /// every retrieval call fails the error is returned as
    /// [`SearchError::AllRequestsFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::AllRequestsFailed`] if no retrieval succeeded.
    pub async fn try_search_timeline(&self, query: &str) -> Result<Vec<CanonicalPaper>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("blank query; returning empty timeline");
            return Ok(Vec::new());
        }

        let key = CacheKey::new(query);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key).await {
                tracing::debug!(count = hit.len(), "timeline cache hit");
                return Ok(hit);
            }
        }

        tracing::trace!(query, "starting timeline search");
        let current_year = self.current_year();

        let queries = expand_or_identity(&self.expander, query).await;
        let raw = retrieve_all(&self.source, &queries, current_year, &self.config).await?;
        let raw_count = raw.len();

        let canonical = normalize(raw);
        let unique_count = canonical.len();
        let scored = score_papers(canonical, current_year);

        let thresholds = QualityThresholds {
            min_year: self.config.min_year,
            uncited_grace_years: self.config.uncited_grace_years,
            current_year,
        };
        let filtered = quality_filter(scored, &thresholds);
        let timeline = assemble(filtered, self.config.max_results);

        tracing::info!(
            queries = queries.len(),
            raw = raw_count,
            unique = unique_count,
            returned = timeline.len(),
            "timeline assembled"
        );

        if let Some(cache) = &self.cache {
            cache.insert(key, timeline.clone()).await;
        }
        Ok(timeline)
    }
}

impl DefaultTimelineSearch {
    /// Build the production pipeline from configuration alone.
    ///
    /// The LLM expander is constructed only when `config.llm` is present
    /// and usable (a key is set, or keyless mode is allowed).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for invalid configuration and
    /// [`SearchError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: TimelineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let source = SemanticScholarSource::new(&config.source)?;
        let expander = match &config.llm {
            Some(llm) if llm.is_available() => {
                Some(OpenAiExpander::new(llm.clone(), config.expansion_count)?)
            }
            Some(_) => {
                tracing::info!("no LLM API key configured; query expansion disabled");
                None
            }
            None => None,
        };
        Self::new(source, expander, config)
    }
}
