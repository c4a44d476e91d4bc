//! Command router: maps validated envelopes onto the timeline service.

use std::future::Future;

use lineage_search::{CanonicalPaper, PaperSource, QueryExpander, TimelineSearch};

use crate::error::{AppError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, EVENT_VERSION, ResponseEnvelope};

/// The timeline operations exposed to host callers.
pub trait TimelineService: Send + Sync {
    fn search_timeline(&self, query: &str) -> impl Future<Output = Vec<CanonicalPaper>> + Send;
    fn find_similar(&self, title: &str) -> impl Future<Output = Vec<CanonicalPaper>> + Send;
}

impl<S: PaperSource, E: QueryExpander> TimelineService for TimelineSearch<S, E> {
    fn search_timeline(&self, query: &str) -> impl Future<Output = Vec<CanonicalPaper>> + Send {
        TimelineSearch::search_timeline(self, query)
    }

    fn find_similar(&self, title: &str) -> impl Future<Output = Vec<CanonicalPaper>> + Send {
        TimelineSearch::find_similar(self, title)
    }
}

/// Routes host commands to a [`TimelineService`].
pub struct HostRouter<T> {
    service: T,
}

impl<T: TimelineService> HostRouter<T> {
    #[must_use]
    pub fn new(service: T) -> Self {
        Self { service }
    }

    /// Validate an envelope and route it, folding any error into an error
    /// response that carries the caller's `request_id`.
    pub async fn dispatch(&self, envelope: &CommandEnvelope) -> ResponseEnvelope {
        if let Err(e) = envelope.validate() {
            return ResponseEnvelope::error(envelope.request_id.clone(), e.to_string());
        }
        match self.route(envelope).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(command = %envelope.command, error = %e, "host command rejected");
                ResponseEnvelope::error(envelope.request_id.clone(), e.to_string())
            }
        }
    }

    /// Route a command envelope to the appropriate handler.
    pub async fn route(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        match envelope.command {
            CommandName::HostPing => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"pong": true}),
            )),
            CommandName::HostVersion => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({
                    "contract_version": EVENT_VERSION,
                    "package_version": env!("CARGO_PKG_VERSION")
                }),
            )),
            CommandName::HostStop => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"stopping": true}),
            )),
            CommandName::TimelineSearch => self.handle_timeline_search(envelope).await,
            CommandName::TimelineSimilar => self.handle_timeline_similar(envelope).await,
        }
    }

    async fn handle_timeline_search(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let query = parse_non_empty_field(&envelope.payload, "query", "timeline.search")?;
        let papers = self.service.search_timeline(&query).await;
        papers_response(envelope, papers)
    }

    async fn handle_timeline_similar(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let title = parse_non_empty_field(&envelope.payload, "title", "timeline.similar")?;
        let papers = self.service.find_similar(&title).await;
        papers_response(envelope, papers)
    }
}

fn papers_response(
    envelope: &CommandEnvelope,
    papers: Vec<CanonicalPaper>,
) -> Result<ResponseEnvelope> {
    let count = papers.len();
    let papers = serde_json::to_value(papers)
        .map_err(|e| AppError::Channel(format!("failed to serialize papers: {e}")))?;
    Ok(ResponseEnvelope::ok(
        envelope.request_id.clone(),
        serde_json::json!({"count": count, "papers": papers}),
    ))
}

fn parse_non_empty_field(
    payload: &serde_json::Value,
    field: &str,
    command: &str,
) -> Result<String> {
    let Some(raw) = payload.get(field).and_then(serde_json::Value::as_str) else {
        return Err(AppError::Command(format!(
            "{command} requires payload.{field}"
        )));
    };
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::Command(format!(
            "{command} requires a non-empty payload.{field}"
        )));
    }
    Ok(value.to_owned())
}
