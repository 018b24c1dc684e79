//! Reddit subreddit search via the public JSON listing endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{endpoint, format_numbered, request_json, SourceFetcher};
use crate::error::SourceError;

const SOURCE_NAME: &str = "reddit";
const SEARCH_LIMIT: &str = "5";

/// Reddit search listing wrapper.
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: PostData,
}

#[derive(Debug, Deserialize)]
struct PostData {
    title: Option<String>,
    score: Option<i64>,
}

/// Fetches hot discussions for a topic from one subreddit.
pub struct RedditFetcher {
    client: Client,
    base_url: String,
    subreddit: String,
}

impl RedditFetcher {
    #[must_use]
    pub fn new(client: Client, base_url: &str, subreddit: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            subreddit: subreddit.to_string(),
        }
    }
}

#[async_trait]
impl SourceFetcher for RedditFetcher {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        let path = format!("r/{}/search.json", self.subreddit);
        let request = self
            .client
            .get(endpoint(&self.base_url, &path))
            .query(&[("q", topic), ("sort", "hot"), ("limit", SEARCH_LIMIT)]);
        let listing: Listing = request_json(SOURCE_NAME, request).await?;

        let posts: Vec<String> = listing
            .data
            .children
            .into_iter()
            .filter_map(|child| {
                let title = child.data.title.filter(|t| !t.trim().is_empty())?;
                Some(format!("{title} (Score: {})", child.data.score.unwrap_or(0)))
            })
            .collect();

        Ok(format_numbered("REDDIT DISCUSSIONS", &posts))
    }
}
