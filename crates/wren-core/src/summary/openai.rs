//! OpenAI chat-completions client for summaries.
//!
//! One request per summary, no retry: a failure is reported to the user
//! and the transcript is left untouched.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WrenError};
use crate::summary::transcript::ChatMessage;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Chat-completions client. Holds the model choice so callers only pass
/// messages.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    token: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client for the given token and model.
    ///
    /// # Errors
    ///
    /// Returns `WrenError::Configuration` when the token is empty, and
    /// `WrenError::Http` if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(WrenError::configuration(
                "Please specify your OpenAI token in the Wren config file",
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| WrenError::http("failed to create HTTP client").with_source(e))?;
        Ok(Self {
            client,
            token,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different server. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends one chat-completion request and returns the assistant reply.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatMessage> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };
        log::debug!("POST {url} ({} messages)", messages.len());
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| WrenError::http(format!("request to {url} failed")).with_source(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WrenError::api(status.as_u16(), body));
        }
        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| WrenError::http("failed to parse OpenAI response").with_source(e))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| WrenError::api(status.as_u16(), "response contained no choices"))
    }
}
