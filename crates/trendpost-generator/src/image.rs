//! Post-to-image step: derive a thumbnail prompt, render it, normalize the result.

use std::sync::Arc;

use trendpost_core::{CacheKey, GeneratedImage, TtlStore};
use trendpost_llm::{ChatMessage, ChatModel, ChatRequest, ImageData, ImageModel};

use crate::prompts::image_prompt_request;

const NO_API_KEY: &str = "No API key configured";
const NO_IMAGE_DATA: &str = "No image data received";
const GENERATION_FAILED: &str = "Failed to generate image";

/// Collapses a provider response into one image reference.
///
/// Only the first entry is considered. A base64 payload wins over a URL.
#[must_use]
pub fn normalize_image_data(data: &[ImageData]) -> GeneratedImage {
    let Some(first) = data.first() else {
        return GeneratedImage::failed(NO_IMAGE_DATA);
    };
    if let Some(b64) = first.b64_json.as_deref().filter(|s| !s.is_empty()) {
        return GeneratedImage::from_base64(b64);
    }
    if let Some(url) = first.url.as_deref().filter(|s| !s.is_empty()) {
        return GeneratedImage::Hosted {
            url: url.to_string(),
        };
    }
    GeneratedImage::failed(NO_IMAGE_DATA)
}

/// Strips whitespace and one layer of wrapping quotes from a model-derived prompt.
fn clean_prompt(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

/// Produces images for posts. Never fails: every problem becomes [`GeneratedImage::Failed`].
pub struct ImageGenerator {
    chat: Arc<dyn ChatModel>,
    images: Option<Arc<dyn ImageModel>>,
    cache: Arc<dyn TtlStore<GeneratedImage>>,
}

impl ImageGenerator {
    /// `images` is `None` when no image provider key is configured.
    #[must_use]
    pub fn new(
        chat: Arc<dyn ChatModel>,
        images: Option<Arc<dyn ImageModel>>,
        cache: Arc<dyn TtlStore<GeneratedImage>>,
    ) -> Self {
        Self {
            chat,
            images,
            cache,
        }
    }

    /// Asks the chat model for a thumbnail prompt, then renders it.
    pub async fn generate_for_post(&self, post: &str) -> GeneratedImage {
        if self.images.is_none() {
            tracing::warn!("image generation skipped: no image API key configured");
            return GeneratedImage::failed(NO_API_KEY);
        }

        let request = ChatRequest::new(vec![ChatMessage::user(image_prompt_request(post))]);
        let prompt = match self.chat.complete(&request).await {
            Ok(completion) => clean_prompt(&completion.content).to_string(),
            Err(e) => {
                tracing::error!(error = %e, "failed to derive image prompt");
                return GeneratedImage::failed(GENERATION_FAILED);
            }
        };
        if prompt.is_empty() {
            tracing::error!("model returned an empty image prompt");
            return GeneratedImage::failed(GENERATION_FAILED);
        }

        self.generate_from_prompt(&prompt).await
    }

    /// Renders an explicit prompt, consulting the image cache first.
    ///
    /// Only successful images are cached.
    pub async fn generate_from_prompt(&self, prompt: &str) -> GeneratedImage {
        let Some(images) = self.images.as_ref() else {
            tracing::warn!("image generation skipped: no image API key configured");
            return GeneratedImage::failed(NO_API_KEY);
        };

        let key = CacheKey::image(prompt);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::info!(key = %key, "image cache hit");
            return cached;
        }

        tracing::info!(prompt_chars = prompt.len(), "generating image");
        let image = match images.generate(prompt).await {
            Ok(data) => normalize_image_data(&data),
            Err(e) => {
                tracing::error!(error = %e, "image provider call failed");
                GeneratedImage::failed(GENERATION_FAILED)
            }
        };

        if image.is_success() {
            self.cache.put(key, image.clone()).await;
        } else if let Some(reason) = image.error() {
            tracing::warn!(reason, "image generation degraded");
        }
        image
    }
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
