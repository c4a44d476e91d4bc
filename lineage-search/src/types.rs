//! Core types for paper records, search options and retrieval strategies.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Suffix appended to a query by the survey strategy.
pub const SURVEY_SUFFIX: &str = " survey review";

/// A paper record exactly as returned by a [`PaperSource`](crate::source::PaperSource).
///
/// Field names follow the Semantic Scholar Graph API. Every field may be
/// missing or `null` upstream; validity is decided later by
/// [`normalize`](crate::orchestrator::dedup::normalize).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaper {
    /// Upstream unique identifier.
    #[serde(default)]
    pub paper_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Publication year.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<RawAuthor>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Machine-generated one-sentence summary.
    #[serde(default)]
    pub tldr: Option<Tldr>,
    /// Citation count. Signed so that malformed negative values survive
    /// decoding and can be clamped instead of failing the whole page.
    #[serde(default)]
    pub citation_count: Option<i64>,
    #[serde(default)]
    pub open_access_pdf: Option<OpenAccessPdf>,
    /// Canonical landing page, used when no open-access PDF exists.
    #[serde(default)]
    pub url: Option<String>,
}

impl RawPaper {
    /// The short summary, if present and non-empty.
    pub fn short_summary(&self) -> Option<&str> {
        self.tldr
            .as_ref()
            .and_then(|t| t.text.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// The open-access PDF URL, if present and non-empty.
    pub fn open_access_pdf_url(&self) -> Option<&str> {
        self.open_access_pdf
            .as_ref()
            .and_then(|pdf| pdf.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Author names in upstream order. Authors without a name are skipped.
    pub fn author_names(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().filter_map(|a| a.name.as_deref())
    }
}

/// One author entry on a [`RawPaper`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawAuthor {
    /// Build an author entry with only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            author_id: None,
            name: Some(name.into()),
        }
    }
}

/// TLDR summary wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tldr {
    #[serde(default)]
    pub text: Option<String>,
}

/// Open-access PDF wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAccessPdf {
    #[serde(default)]
    pub url: Option<String>,
}

/// A validated, deduplicated paper ready for scoring and presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPaper {
    /// Unique key within one timeline.
    pub id: String,
    pub title: String,
    pub year: i32,
    /// Author names joined with `", "`.
    pub authors: String,
    /// Short summary, truncated abstract, or a placeholder.
    pub description: String,
    /// Open-access PDF if available, else the landing page.
    pub document_url: Option<String>,
    pub citation_count: u64,
    /// Composite impact/recency score (higher is better). Zero until the
    /// scoring stage runs.
    pub score: f64,
}

/// How the upstream search capability should order its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    Relevance,
    CitationCount,
}

impl SortMode {
    /// Wire value for the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::CitationCount => "citationCount",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single paper-source search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of records to request.
    pub limit: usize,
    pub sort: SortMode,
    /// Inclusive publication-year window `(min, max)`.
    pub year_range: Option<(i32, i32)>,
}

/// The three retrieval intents applied to every expanded query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Most-cited work, no year restriction. Surfaces foundational papers.
    Impact,
    /// Relevance search for synthesis papers.
    Survey,
    /// Relevance search restricted to the last few years.
    Recent,
}

impl Strategy {
    /// Returns the human-readable name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Impact => "impact",
            Self::Survey => "survey",
            Self::Recent => "recent",
        }
    }

    /// Number of records requested per call.
    pub fn limit(&self) -> usize {
        match self {
            Self::Impact => 10,
            Self::Survey => 5,
            Self::Recent => 10,
        }
    }

    /// Returns all strategies in dispatch order.
    pub fn all() -> &'static [Strategy] {
        &[Self::Impact, Self::Survey, Self::Recent]
    }

    /// The query string actually sent for `query` under this strategy.
    pub fn query_for(&self, query: &str) -> String {
        match self {
            Self::Survey => format!("{query}{SURVEY_SUFFIX}"),
            Self::Impact | Self::Recent => query.to_string(),
        }
    }

    /// Search options for this strategy.
    ///
    /// `recent_window_years` only affects [`Strategy::Recent`], whose year
    /// range is `[current_year - recent_window_years, current_year]`.
    pub fn options(&self, current_year: i32, recent_window_years: i32) -> SearchOptions {
        match self {
            Self::Impact => SearchOptions {
                limit: self.limit(),
                sort: SortMode::CitationCount,
                year_range: None,
            },
            Self::Survey => SearchOptions {
                limit: self.limit(),
                sort: SortMode::Relevance,
                year_range: None,
            },
            Self::Recent => SearchOptions {
                limit: self.limit(),
                sort: SortMode::Relevance,
                year_range: Some((current_year - recent_window_years, current_year)),
            },
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
