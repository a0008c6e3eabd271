//! OpenAI-compatible chat completions client.
//!
//! Talks to any server implementing `POST /v1/chat/completions`: OpenAI,
//! OpenRouter, Ollama, vLLM, llama.cpp server. Non-streaming: every agent
//! in this crate consumes whole responses, so SSE buys nothing here.
//!
//! Response parsing is deliberately lenient; only
//! `choices[0].message.content` is required, because upstream servers
//! vary in which optional fields they populate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::{MentorError, Result};

/// Per-request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// A single message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user`, or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Stateless chat completions client.
///
/// Holds connection details and a reqwest client; conversation state, if
/// any, is the caller's concern.
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: usize,
}

impl ChatClient {
    /// Build a client from LLM configuration.
    ///
    /// The API key comes from the config (inline or environment). A
    /// missing key is an error for remote providers but tolerated for
    /// localhost servers, which typically run unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns a config error when the key is required but absent, or an
    /// LLM error if the HTTP client cannot be constructed.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = match config.resolve_api_key() {
            Ok(key) => key,
            Err(_) if is_local_url(&config.api_url) => String::new(),
            Err(e) => return Err(e),
        };

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MentorError::Llm(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint_url(&config.api_url),
            api_key,
            model: config.api_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Run one system+user completion and return the assistant text.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::Llm`] on transport errors, non-success
    /// status codes, or an empty/contentless response.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages = [
            ChatMessage {
                role: "system".to_owned(),
                content: system.to_owned(),
            },
            ChatMessage {
                role: "user".to_owned(),
                content: user.to_owned(),
            },
        ];

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "chat completion request");

        let mut request = self.http.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MentorError::Llm(format!("API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| MentorError::Llm(format!("API returned error status: {e}")))?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| MentorError::Llm(format!("invalid API response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(MentorError::Llm("empty response from API".into()));
        }

        tracing::trace!(chars = content.len(), "chat completion received");
        Ok(content)
    }
}

/// Build the completions endpoint, tolerating a base URL with or without
/// a trailing `/v1`.
fn endpoint_url(api_url: &str) -> String {
    let base = api_url.trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{base}/v1/chat/completions")
}

/// Loopback servers run unauthenticated; everything else needs a key.
fn is_local_url(api_url: &str) -> bool {
    api_url.contains("localhost") || api_url.contains("127.0.0.1")
}
