//! Chat-completion client for OpenRouter's OpenAI-compatible endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::{build_client, endpoint, post_json};

const SERVICE: &str = "openrouter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One chat turn to send to a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Sequences at which the model should stop generating.
    pub stop: Vec<String>,
}

impl ChatRequest {
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            stop: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop.push(stop.into());
        self
    }
}

/// The model's reply as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub content: String,
    pub model: Option<String>,
    pub finish_reason: Option<String>,
}

/// A chat-completion capable model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one request and returns the first choice.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError>;
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    stop: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenRouter client bound to one model.
pub struct OpenRouterClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    /// Creates a client for the API rooted at `base_url`, sending `user_agent`
    /// on every request.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            url: endpoint(base_url, "chat/completions"),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenRouterClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            stop: &request.stop,
        };

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "sending chat completion"
        );
        let response: CompletionResponse =
            post_json(&self.client, SERVICE, &self.url, &self.api_key, &body).await?;

        if let Some(error) = response.error {
            return Err(LlmError::Api {
                service: SERVICE,
                message: error.message,
            });
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse(SERVICE))?;
        let content = choice
            .message
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse(SERVICE))?;

        Ok(ChatCompletion {
            content,
            model: response.model,
            finish_reason: choice.finish_reason,
        })
    }
}
