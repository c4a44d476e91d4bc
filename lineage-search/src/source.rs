//! Trait definition for pluggable academic-search backends.
//!
//! The production backend is
//! [`SemanticScholarSource`](crate::sources::SemanticScholarSource); tests
//! substitute in-memory sources.

use std::sync::Arc;

use crate::error::SearchError;
use crate::types::{RawPaper, SearchOptions};

/// A pluggable academic-search backend.
///
/// Implementors translate a query plus [`SearchOptions`] into a request
/// against an upstream capability and decode the resulting page into
/// [`RawPaper`] values. An empty page is `Ok(vec![])`, never an error.
///
/// All implementations must be `Send + Sync` so the retriever can issue
/// concurrent requests through a shared reference.
pub trait PaperSource: Send + Sync {
    /// Search for papers.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails, times out, or the
    /// response cannot be decoded.
    fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> impl std::future::Future<Output = Result<Vec<RawPaper>, SearchError>> + Send;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

impl<S: PaperSource> PaperSource for Arc<S> {
    fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> impl std::future::Future<Output = Result<Vec<RawPaper>, SearchError>> + Send {
        (**self).search(query, options)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SortMode, Strategy};

    /// A canned source for testing trait bounds and async execution.
    struct CannedSource {
        papers: Vec<RawPaper>,
    }

    impl PaperSource for CannedSource {
        async fn search(
            &self,
            _query: &str,
            options: &SearchOptions,
        ) -> Result<Vec<RawPaper>, SearchError> {
            if self.papers.is_empty() {
                return Err(SearchError::Http("canned source failure".into()));
            }
            Ok(self.papers.iter().take(options.limit).cloned().collect())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    fn paper(id: &str) -> RawPaper {
        RawPaper {
            paper_id: Some(id.into()),
            ..Default::default()
        }
    }

    #[test]
    fn canned_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CannedSource>();
        assert_send_sync::<Arc<CannedSource>>();
    }

    #[tokio::test]
    async fn canned_source_respects_limit() {
        let source = CannedSource {
            papers: (0..8).map(|i| paper(&format!("p{i}"))).collect(),
        };
        let options = Strategy::Survey.options(2025, 3);
        let results = source.search("q", &options).await.expect("should succeed");
        assert_eq!(results.len(), 5);
    }

    #[tokio::test]
    async fn arc_source_delegates() {
        let source = Arc::new(CannedSource {
            papers: vec![paper("p1")],
        });
        let options = SearchOptions {
            limit: 10,
            sort: SortMode::Relevance,
            year_range: None,
        };
        let results = source.search("q", &options).await.expect("should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(PaperSource::name(&source), "canned");
    }

    #[tokio::test]
    async fn canned_source_propagates_errors() {
        let source = CannedSource { papers: vec![] };
        let options = Strategy::Impact.options(2025, 3);
        let err = source.search("q", &options).await.unwrap_err();
        assert!(err.to_string().contains("canned source failure"));
    }
}
