//! The agent's tool belt: cached web search and image generation.

use std::sync::Arc;

use trendpost_core::{CacheKey, GeneratedImage, TtlStore};
use trendpost_sources::WebSearch;

use crate::image::ImageGenerator;
use crate::prompts::{tool_names, GENERATE_IMAGE, GOOGLE_SEARCH};

const SEARCH_FAILED: &str = "Failed to perform Google search. Please try a different query.";
const TRUNCATION_SUFFIX: &str = "... (truncated for efficiency)";
const IMAGE_ATTACHED: &str = "Image generated successfully and attached to the post.";

/// What a tool call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    /// Text fed back to the model as the observation.
    pub observation: String,
    /// Set by every `generate_image` call, successful or not.
    pub image: Option<GeneratedImage>,
}

impl ToolOutcome {
    fn text(observation: impl Into<String>) -> Self {
        Self {
            observation: observation.into(),
            image: None,
        }
    }
}

/// Cuts `text` to at most `max_chars` characters, marking the cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_SUFFIX}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

pub struct AgentTools {
    search: Arc<dyn WebSearch>,
    search_cache: Arc<dyn TtlStore<String>>,
    images: Arc<ImageGenerator>,
    search_max_chars: usize,
}

impl AgentTools {
    #[must_use]
    pub fn new(
        search: Arc<dyn WebSearch>,
        search_cache: Arc<dyn TtlStore<String>>,
        images: Arc<ImageGenerator>,
        search_max_chars: usize,
    ) -> Self {
        Self {
            search,
            search_cache,
            images,
            search_max_chars,
        }
    }

    /// Dispatches one tool call. Tool failures become observations, never errors.
    pub async fn run(&self, tool: &str, input: &str) -> ToolOutcome {
        if tool == GOOGLE_SEARCH.name {
            ToolOutcome::text(self.google_search(input).await)
        } else if tool == GENERATE_IMAGE.name {
            self.generate_image(input).await
        } else {
            tracing::warn!(tool, "agent requested an unknown tool");
            ToolOutcome::text(format!(
                "{tool} is not a valid tool, try one of [{}].",
                tool_names()
            ))
        }
    }

    async fn google_search(&self, query: &str) -> String {
        let key = CacheKey::search(query);
        if let Some(cached) = self.search_cache.get(&key).await {
            tracing::info!(query, "search cache hit");
            return cached;
        }

        match self.search.search(query).await {
            Ok(results) => {
                let results = truncate_chars(&results, self.search_max_chars);
                self.search_cache.put(key, results.clone()).await;
                results
            }
            Err(e) => {
                tracing::error!(query, error = %e, "google search failed");
                SEARCH_FAILED.to_string()
            }
        }
    }

    async fn generate_image(&self, prompt: &str) -> ToolOutcome {
        let image = self.images.generate_from_prompt(prompt).await;
        let observation = match image.error() {
            None => IMAGE_ATTACHED.to_string(),
            Some(reason) => format!("Failed to generate image: {reason}"),
        };
        ToolOutcome {
            observation,
            image: Some(image),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        image_cache, search_cache, FakeImages, FakeSearch, ImageReply, ScriptedChat,
    };

    fn tools(search: Arc<FakeSearch>, images: Arc<FakeImages>, max_chars: usize) -> AgentTools {
        let generator =
            ImageGenerator::new(ScriptedChat::new(["unused"]), Some(images), image_cache());
        AgentTools::new(search, search_cache(), Arc::new(generator), max_chars)
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly", 7), "exactly");
        assert_eq!(
            truncate_chars("🦀🦀🦀", 2),
            "🦀🦀... (truncated for efficiency)"
        );
    }

    #[tokio::test]
    async fn long_search_results_are_truncated() {
        let search = FakeSearch::returning(&"x".repeat(1000));
        let tools = tools(search, FakeImages::base64("QUJD"), 800);

        let outcome = tools.run("google_search", "rust").await;

        assert_eq!(
            outcome.observation,
            format!("{}... (truncated for efficiency)", "x".repeat(800))
        );
        assert!(outcome.image.is_none());
    }

    #[tokio::test]
    async fn repeated_searches_hit_the_cache() {
        let search = FakeSearch::returning("Rust 1.90\nNew release\nhttps://blog.rust-lang.org");
        let tools = tools(search.clone(), FakeImages::base64("QUJD"), 800);

        let first = tools.run("google_search", "Rust News").await;
        let second = tools.run("google_search", "rust   news").await;

        assert_eq!(first, second);
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn failed_search_is_an_observation_and_not_cached() {
        let search = FakeSearch::failing();
        let tools = tools(search.clone(), FakeImages::base64("QUJD"), 800);

        let outcome = tools.run("google_search", "rust").await;
        tools.run("google_search", "rust").await;

        assert_eq!(
            outcome.observation,
            "Failed to perform Google search. Please try a different query."
        );
        assert_eq!(search.call_count(), 2);
    }

    #[tokio::test]
    async fn image_tool_returns_structured_image() {
        let tools = tools(FakeSearch::returning(""), FakeImages::base64("QUJD"), 800);

        let outcome = tools.run("generate_image", "a crab").await;

        assert_eq!(outcome.observation, IMAGE_ATTACHED);
        assert_eq!(
            outcome.image.as_ref().and_then(GeneratedImage::image_url),
            Some("data:image/png;base64,QUJD")
        );
        assert!(!outcome.observation.contains("data:image"));
    }

    #[tokio::test]
    async fn image_tool_failure_is_reported() {
        let tools = tools(
            FakeSearch::returning(""),
            FakeImages::with(ImageReply::Data(Vec::new())),
            800,
        );

        let outcome = tools.run("generate_image", "a crab").await;

        assert_eq!(
            outcome.observation,
            "Failed to generate image: No image data received"
        );
        assert!(outcome.image.is_some_and(|i| !i.is_success()));
    }

    #[tokio::test]
    async fn unknown_tool_lists_valid_tools() {
        let tools = tools(FakeSearch::returning(""), FakeImages::base64("QUJD"), 800);
        let outcome = tools.run("bing_search", "rust").await;
        assert_eq!(
            outcome.observation,
            "bing_search is not a valid tool, try one of [google_search, generate_image]."
        );
    }
}
