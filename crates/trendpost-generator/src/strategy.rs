//! Interchangeable niche-to-post orchestrations.

use std::sync::Arc;

use async_trait::async_trait;
use trendpost_core::{GeneratedContent, GeneratedImage, GeneratedPost, StrategyKind, Topic};
use trendpost_sources::ContentAggregator;

use crate::agent::ToolAgent;
use crate::error::GenerateError;
use crate::image::ImageGenerator;
use crate::post::PostGenerator;

const AGENT_NO_IMAGE: &str = "Agent did not generate an image";

#[async_trait]
pub trait PostStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Produces a post and an image outcome for `topic`.
    ///
    /// Image problems are reported inside [`GeneratedContent::image`], never as errors.
    async fn produce_post(&self, topic: &Topic) -> Result<GeneratedContent, GenerateError>;
}

/// Aggregate sources, draft the post, then derive an image from it.
pub struct PipelineStrategy {
    aggregator: ContentAggregator,
    posts: PostGenerator,
    images: Arc<ImageGenerator>,
}

impl PipelineStrategy {
    #[must_use]
    pub fn new(
        aggregator: ContentAggregator,
        posts: PostGenerator,
        images: Arc<ImageGenerator>,
    ) -> Self {
        Self {
            aggregator,
            posts,
            images,
        }
    }
}

#[async_trait]
impl PostStrategy for PipelineStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pipeline
    }

    async fn produce_post(&self, topic: &Topic) -> Result<GeneratedContent, GenerateError> {
        let content = self.aggregator.collect(topic.as_str()).await?;
        tracing::info!(topic = %topic, sources = ?content.sources, "content aggregated");

        let completion = self.posts.generate(topic, &content).await?;
        let post = GeneratedPost {
            text: completion.content,
        };

        let image = self.images.generate_for_post(&post.text).await;
        if let Some(reason) = image.error() {
            tracing::warn!(topic = %topic, reason, "returning post without image");
        }

        Ok(GeneratedContent { post, image })
    }
}

/// Let the model drive search and image generation itself.
pub struct AgentStrategy {
    agent: ToolAgent,
}

impl AgentStrategy {
    #[must_use]
    pub fn new(agent: ToolAgent) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl PostStrategy for AgentStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Agent
    }

    async fn produce_post(&self, topic: &Topic) -> Result<GeneratedContent, GenerateError> {
        let run = self.agent.run(topic).await?;
        let image = run
            .image
            .unwrap_or_else(|| GeneratedImage::failed(AGENT_NO_IMAGE));
        if let Some(reason) = image.error() {
            tracing::warn!(topic = %topic, reason, "agent post has no image");
        }
        Ok(GeneratedContent {
            post: GeneratedPost { text: run.output },
            image,
        })
    }
}

#[cfg(test)]
#[path = "strategy_test.rs"]
mod tests;
