//! Query expansion: one user topic in, several academic queries out.
//!
//! [`QueryExpander`] is the fallible seam; [`expand_or_identity`] is the
//! infallible wrapper the pipeline uses. Any failure degrades to the
//! original query alone.

pub mod openai;

pub use openai::OpenAiExpander;

use crate::error::SearchError;

/// A capability that rewrites a topic into related academic queries.
pub trait QueryExpander: Send + Sync {
    /// Produce related queries for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport, status or decoding failures.
    fn expand(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, SearchError>> + Send;

    /// Whether the capability is configured. When `false` the pipeline
    /// skips the call entirely.
    fn is_available(&self) -> bool {
        true
    }
}

/// Expander that never calls out and always yields the original query.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExpander;

impl QueryExpander for IdentityExpander {
    async fn expand(&self, query: &str) -> Result<Vec<String>, SearchError> {
        Ok(vec![query.to_string()])
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// An absent expander is an unavailable one.
impl<E: QueryExpander> QueryExpander for Option<E> {
    async fn expand(&self, query: &str) -> Result<Vec<String>, SearchError> {
        match self {
            Some(expander) => expander.expand(query).await,
            None => Err(SearchError::Llm("no LLM configured".into())),
        }
    }

    fn is_available(&self) -> bool {
        self.as_ref().is_some_and(|e| e.is_available())
    }
}

/// Expand `query`, falling back to `[query]` on unavailability or failure.
///
/// The returned list is never empty. Blank suggestions are discarded.
pub async fn expand_or_identity<E: QueryExpander>(expander: &E, query: &str) -> Vec<String> {
    if !expander.is_available() {
        tracing::debug!("query expansion unavailable; using original query");
        return vec![query.to_string()];
    }

    match expander.expand(query).await {
        Ok(queries) => {
            let cleaned = clean_queries(queries);
            if cleaned.is_empty() {
                tracing::warn!("query expansion returned no usable queries; using original query");
                vec![query.to_string()]
            } else {
                tracing::debug!(count = cleaned.len(), "query expanded");
                cleaned
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "query expansion failed; using original query");
            vec![query.to_string()]
        }
    }
}

/// Trim each query and drop blanks, preserving order.
fn clean_queries(queries: Vec<String>) -> Vec<String> {
    queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}
