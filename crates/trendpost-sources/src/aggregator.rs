//! Concurrent collection of source excerpts into one prompt-ready blob.

use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use trendpost_core::AppConfig;

use crate::error::SourceError;
use crate::sources::{
    build_http_client, fetch_excerpt, HackerNewsFetcher, RedditFetcher, SourceFetcher,
    TrendSimulator,
};
use crate::types::AggregatedContent;

const SEPARATOR: &str = "\n\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no content found from any source for topic '{topic}'")]
    NoContentFound { topic: String },
}

/// Runs every configured fetcher for a topic and joins the results.
#[derive(Clone)]
pub struct ContentAggregator {
    fetchers: Vec<Arc<dyn SourceFetcher>>,
}

impl ContentAggregator {
    #[must_use]
    pub fn new(fetchers: Vec<Arc<dyn SourceFetcher>>) -> Self {
        Self { fetchers }
    }

    /// The default source set: Hacker News, Reddit, then the trend simulator.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the shared HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let client = build_http_client(config.http_timeout_secs, &config.user_agent)?;
        Ok(Self::new(vec![
            Arc::new(HackerNewsFetcher::new(
                client.clone(),
                &config.hacker_news_base_url,
            )),
            Arc::new(RedditFetcher::new(
                client,
                &config.reddit_base_url,
                &config.reddit_subreddit,
            )),
            Arc::new(TrendSimulator),
        ]))
    }

    /// Fetches all sources concurrently and joins non-empty excerpts with a
    /// blank line, in fetcher order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::NoContentFound`] when every source came back empty.
    pub async fn collect(&self, topic: &str) -> Result<AggregatedContent, AggregateError> {
        let excerpts = join_all(
            self.fetchers
                .iter()
                .map(|fetcher| fetch_excerpt(fetcher.as_ref(), topic)),
        )
        .await;

        let mut parts = Vec::with_capacity(excerpts.len());
        let mut sources = Vec::with_capacity(excerpts.len());
        for excerpt in excerpts {
            if excerpt.is_empty() {
                tracing::info!(source = excerpt.source_name, topic, "source yielded no content");
                continue;
            }
            sources.push(excerpt.source_name);
            parts.push(excerpt.text);
        }

        let text = parts.join(SEPARATOR);
        if text.trim().is_empty() {
            return Err(AggregateError::NoContentFound {
                topic: topic.to_string(),
            });
        }

        tracing::debug!(topic, sources = ?sources, chars = text.len(), "aggregated content");
        Ok(AggregatedContent { text, sources })
    }
}
