//! Image-generation client for Together AI.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::{build_client, endpoint, post_json};

const SERVICE: &str = "together";

/// One image entry as returned by the provider. Either field may be populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    pub b64_json: Option<String>,
    pub url: Option<String>,
}

/// A text-to-image model.
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Requests one image for `prompt`. An empty vector means the provider sent no data.
    async fn generate(&self, prompt: &str) -> Result<Vec<ImageData>, LlmError>;
}

#[derive(Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

/// Together AI client bound to one image model.
pub struct TogetherImageClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl TogetherImageClient {
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
            url: endpoint(base_url, "images/generations"),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }
}

#[async_trait]
impl ImageModel for TogetherImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<ImageData>, LlmError> {
        let body = GenerationBody {
            model: &self.model,
            prompt,
            n: 1,
        };
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "requesting image");
        let response: GenerationResponse =
            post_json(&self.client, SERVICE, &self.url, &self.api_key, &body).await?;
        Ok(response.data)
    }
}
