//! Trending-content sources for trendpost.
//!
//! Each fetcher queries one source (Hacker News, Reddit, a local trend list) and
//! yields a short formatted excerpt. The [`ContentAggregator`] runs them
//! concurrently and joins whatever came back. [`GoogleSearchClient`] backs the
//! agent's web search tool.

pub mod aggregator;
pub mod error;
pub mod sources;
pub mod types;

pub use aggregator::{AggregateError, ContentAggregator};
pub use error::SourceError;
pub use sources::{
    build_http_client, fetch_excerpt, GoogleSearchClient, HackerNewsFetcher, RedditFetcher,
    SourceFetcher, TrendSimulator, WebSearch,
};
pub use types::{AggregatedContent, SourceExcerpt};
