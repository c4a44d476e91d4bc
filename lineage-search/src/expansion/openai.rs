//! LLM-backed query expansion over an OpenAI-compatible Chat Completions API.
//!
//! Sends one non-streaming `POST /v1/chat/completions` request with
//! `response_format = json_object` and decodes `{"queries": [...]}` from the
//! first choice's message content.

use serde::Deserialize;
use url::Url;

use crate::config::{parse_base_url, LlmConfig};
use crate::error::SearchError;
use crate::http;

use super::QueryExpander;

/// Query expander backed by an OpenAI-compatible completion endpoint.
pub struct OpenAiExpander {
    client: reqwest::Client,
    endpoint: Url,
    config: LlmConfig,
    count: usize,
}

impl OpenAiExpander {
    /// Build an expander that asks for `count` related queries.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an unusable base URL and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig, count: usize) -> Result<Self, SearchError> {
        let endpoint = parse_base_url(&config.base_url)?
            .join("v1/chat/completions")
            .map_err(|e| SearchError::Config(format!("invalid completions endpoint: {e}")))?;
        let client = http::build_client(config.timeout_seconds, None)?;
        Ok(Self {
            client,
            endpoint,
            config,
            count,
        })
    }

    /// The fully-resolved completions endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl QueryExpander for OpenAiExpander {
    async fn expand(&self, query: &str) -> Result<Vec<String>, SearchError> {
        tracing::trace!(query, model = %self.config.model, "requesting query expansion");

        let body = build_request(&self.config, &build_prompt(query, self.count));
        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            request = request.bearer_auth(key.trim());
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::classify_error("completion request failed", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| http::classify_error("completion response read failed", e))?;

        if !status.is_success() {
            let message = upstream_error_message(&text)
                .unwrap_or_else(|| format!("completion API returned status {status}"));
            return Err(SearchError::Llm(message));
        }

        let mut queries = parse_completion(&text)?;
        queries.truncate(self.count);
        Ok(queries)
    }

    fn is_available(&self) -> bool {
        self.config.is_available()
    }
}

/// Build the expansion prompt.
fn build_prompt(query: &str, count: usize) -> String {
    format!(
        "You are a scientific literature search engine. Rewrite the user's topic into \
         exactly {count} related academic search queries using the real scientific \
         vocabulary of the field, in English.\n\
         Respond with JSON only, in the form {{\"queries\": [\"...\", \"...\"]}}.\n\n\
         Topic: \"{query}\""
    )
}

/// Build the Chat Completions request body.
fn build_request(config: &LlmConfig, prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "model": config.model,
        "messages": [{"role": "user", "content": prompt}],
        "temperature": config.temperature,
        "response_format": {"type": "json_object"},
    })
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExpandedQueries {
    queries: Vec<String>,
}

/// Decode the query list out of a Chat Completions response body.
fn parse_completion(body: &str) -> Result<Vec<String>, SearchError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid completion response: {e}")))?;
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| SearchError::Parse("completion response has no content".into()))?;
    let expanded: ExpandedQueries = serde_json::from_str(content.trim())
        .map_err(|e| SearchError::Parse(format!("completion content is not a query list: {e}")))?;
    Ok(expanded.queries)
}

/// Pull `error.message` out of an OpenAI-style error body.
fn upstream_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
