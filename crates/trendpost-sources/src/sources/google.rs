//! Google Custom Search JSON API client backing the agent's search tool.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{endpoint, request_json};
use crate::error::SourceError;

const SOURCE_NAME: &str = "google_search";

/// Returned when a search succeeds but has no items.
pub const NO_RESULTS: &str = "No good Google Search Result was found";

/// A web search capability that returns readable text.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SourceError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Searches recent pages (last three days, newest first, three results).
pub struct GoogleSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    cse_id: String,
}

impl GoogleSearchClient {
    #[must_use]
    pub fn new(client: Client, base_url: &str, api_key: &str, cse_id: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            cse_id: cse_id.to_string(),
        }
    }
}

#[async_trait]
impl WebSearch for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<String, SourceError> {
        let request = self
            .client
            .get(endpoint(&self.base_url, "customsearch/v1"))
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("dateRestrict", "d3"),
                ("num", "3"),
                ("sort", "date"),
            ]);
        let response: SearchResponse = request_json(SOURCE_NAME, request).await?;

        if response.items.is_empty() {
            return Ok(NO_RESULTS.to_string());
        }

        let blocks: Vec<String> = response
            .items
            .into_iter()
            .map(|item| format!("{}\n{}\n{}", item.title, item.snippet, item.link))
            .collect();
        Ok(blocks.join("\n\n"))
    }
}
