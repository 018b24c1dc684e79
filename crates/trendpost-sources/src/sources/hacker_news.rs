//! Hacker News story search via the Algolia API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{endpoint, format_numbered, request_json, SourceFetcher};
use crate::error::SourceError;

const SOURCE_NAME: &str = "hacker_news";
const HITS_PER_PAGE: &str = "5";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    title: Option<String>,
    points: Option<i64>,
}

/// Fetches the top stories matching a topic.
pub struct HackerNewsFetcher {
    client: Client,
    base_url: String,
}

impl HackerNewsFetcher {
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl SourceFetcher for HackerNewsFetcher {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "api/v1/search"))
            .query(&[
                ("query", topic),
                ("tags", "story"),
                ("hitsPerPage", HITS_PER_PAGE),
            ]);
        let response: SearchResponse = request_json(SOURCE_NAME, request).await?;

        let stories: Vec<String> = response
            .hits
            .into_iter()
            .filter_map(|hit| {
                let title = hit.title.filter(|t| !t.trim().is_empty())?;
                Some(format!("{title} (Score: {})", hit.points.unwrap_or(0)))
            })
            .collect();

        Ok(format_numbered("HACKER NEWS STORIES", &stories))
    }
}
