//! Blocking HTTP client for an OpenAI-compatible chat completions API.
//!
//! The default deployment talks to Groq, but anything speaking the same
//! `/openai/v1/chat/completions` shape works, which is also how the tests
//! point the client at a local mock server.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{CHAT_COMPLETIONS_PATH, PROVIDER_TIMEOUT};
use crate::errors::{AppError, AppResult, ProviderError};

use super::parser::{parse_analysis, AnalysisResult};
use super::prompts::{question_prompt, summary_prompt};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn user(content: &str) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: String,
}

/// Client for the provider's chat completions endpoint.
///
/// Constructed once at startup and injected into the engine; nothing in
/// this crate reaches for a global client. Requests carry a hard timeout
/// and are never retried.
pub struct ChatClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl ChatClient {
    /// Creates a client for `base_url` with the fixed request timeout.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(ChatClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
        })
    }

    /// Runs the structured mood analysis over the combined entry text.
    ///
    /// Transport and protocol failures surface as [`ProviderError`];
    /// structural gaps in an otherwise valid reply do not (the parser
    /// leaves those fields empty).
    pub fn analyze(&self, combined_text: &str) -> AppResult<AnalysisResult> {
        let reply = self.complete(&summary_prompt(combined_text))?;
        Ok(parse_analysis(&reply))
    }

    /// Answers a free-form question against the combined entry text,
    /// returning the provider reply verbatim.
    pub fn answer(&self, combined_text: &str, question: &str) -> AppResult<String> {
        self.complete(&question_prompt(combined_text, question))
    }

    fn complete(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}{CHAT_COMPLETIONS_PATH}", self.base_url);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
        };

        debug!(%url, model = %self.model, "sending chat completion request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(ProviderError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let reply: ChatResponse = response.json().map_err(|e| {
            ProviderError::MalformedReply(format!("could not decode completion response: {e}"))
        })?;
        let choice = reply.choices.into_iter().next().ok_or_else(|| {
            ProviderError::MalformedReply("reply contained no choices".to_string())
        })?;

        debug!(chars = choice.message.content.len(), "received completion");
        Ok(choice.message.content)
    }
}
