//! Multi-strategy retrieval: every expanded query × every [`Strategy`].
//!
//! The three strategies of one query are dispatched concurrently and joined.
//! Expanded queries are processed in waves of `query_concurrency`, in order, so the
//! accumulated collection is deterministic for fixed upstream responses.
//! A failing call contributes zero records; it never cancels its siblings.

use std::time::Duration;

use crate::config::TimelineConfig;
use crate::error::SearchError;
use crate::source::PaperSource;
use crate::types::{RawPaper, Strategy};

/// Outcome of one strategy call for one expanded query.
type CallOutcome = (Strategy, Result<Vec<RawPaper>, SearchError>);

/// Run all strategies for all `queries` and concatenate the results.
///
/// # Errors
///
/// Returns [`SearchError::AllRequestsFailed`] only if **every** call failed.
/// Partial failures are logged at warn level and otherwise ignored.
pub async fn retrieve_all<S: PaperSource>(
    source: &S,
    queries: &[String],
    current_year: i32,
    config: &TimelineConfig,
) -> Result<Vec<RawPaper>, SearchError> {
    let mut per_query: Vec<Vec<CallOutcome>> = Vec::with_capacity(queries.len());
    for wave in queries.chunks(config.query_concurrency.max(1)) {
        let calls = wave
            .iter()
            .map(|query| retrieve_query(source, query, current_year, config));
        per_query.extend(futures::future::join_all(calls).await);
    }

    let mut papers: Vec<RawPaper> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    let mut succeeded = 0usize;

    for (strategy, outcome) in per_query.into_iter().flatten() {
        match outcome {
            Ok(batch) => {
                succeeded += 1;
                tracing::debug!(%strategy, count = batch.len(), source = source.name(), "strategy returned papers");
                papers.extend(batch);
            }
            Err(err) => {
                tracing::warn!(%strategy, error = %err, source = source.name(), "strategy request failed");
                errors.push(format!("{strategy}: {err}"));
            }
        }
    }

    if succeeded == 0 && !errors.is_empty() {
        return Err(SearchError::AllRequestsFailed(errors.join("; ")));
    }

    Ok(papers)
}

/// Dispatch the three strategies for a single query concurrently.
async fn retrieve_query<S: PaperSource>(
    source: &S,
    query: &str,
    current_year: i32,
    config: &TimelineConfig,
) -> Vec<CallOutcome> {
    let timeout = Duration::from_secs(config.source.timeout_seconds);

    let calls = Strategy::all().iter().map(|strategy| {
        let strategy = *strategy;
        let sent_query = strategy.query_for(query);
        let options = strategy.options(current_year, config.recent_window_years);
        async move {
            let outcome = match tokio::time::timeout(timeout, source.search(&sent_query, &options)).await {
                Ok(result) => result,
                Err(_) => Err(SearchError::Timeout(format!(
                    "{strategy} request exceeded {}s",
                    timeout.as_secs()
                ))),
            };
            (strategy, outcome)
        }
    });

    futures::future::join_all(calls).await
}
