//! Semantic Scholar Graph API paper source.
//!
//! Issues `GET {base}/paper/search` requests with the field list the
//! normalizer needs. Free-tier access works without a key; when a key is
//! configured it is sent as `x-api-key`.

use serde::Deserialize;
use url::Url;

use crate::config::{parse_base_url, SourceConfig};
use crate::error::SearchError;
use crate::http;
use crate::source::PaperSource;
use crate::types::{RawPaper, SearchOptions};

/// Fields requested for every search.
pub const SEARCH_FIELDS: &str =
    "title,abstract,tldr,year,authors,url,openAccessPdf,citationCount,paperId";

/// One page of search results. `data` may be absent on empty result sets.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Option<Vec<RawPaper>>,
}

/// Semantic Scholar search client.
pub struct SemanticScholarSource {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl SemanticScholarSource {
    /// Build a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an unusable base URL and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SourceConfig) -> Result<Self, SearchError> {
        let endpoint = parse_base_url(&config.base_url)?
            .join("paper/search")
            .map_err(|e| SearchError::Config(format!("invalid search endpoint: {e}")))?;
        let client = http::build_client(config.timeout_seconds, config.user_agent.as_deref())?;
        let api_key = config
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// The fully-resolved search endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PaperSource for SemanticScholarSource {
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<RawPaper>, SearchError> {
        tracing::trace!(query, limit = options.limit, sort = %options.sort, "Semantic Scholar search");

        let params = build_query_params(query, options);
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::classify_error("Semantic Scholar request failed", e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::Http(
                "Semantic Scholar rate limit exceeded (429)".into(),
            ));
        }
        if !status.is_success() {
            return Err(SearchError::Http(format!(
                "Semantic Scholar HTTP error: {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| http::classify_error("Semantic Scholar response read failed", e))?;

        tracing::trace!(bytes = body.len(), "Semantic Scholar response received");

        parse_search_page(&body)
    }

    fn name(&self) -> &'static str {
        "semantic-scholar"
    }
}

/// Build the query-string pairs for one search.
fn build_query_params(query: &str, options: &SearchOptions) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("query", query.to_string()),
        ("limit", options.limit.to_string()),
        ("sort", options.sort.as_str().to_string()),
        ("fields", SEARCH_FIELDS.to_string()),
    ];
    if let Some((min, max)) = options.year_range {
        params.push(("year", format!("{min}-{max}")));
    }
    params
}

/// Decode a search response body. A missing or `null` `data` is an empty page.
fn parse_search_page(body: &str) -> Result<Vec<RawPaper>, SearchError> {
    let page: SearchPage = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid Semantic Scholar response: {e}")))?;
    Ok(page.data.unwrap_or_default())
}
