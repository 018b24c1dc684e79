//! Source fetcher abstractions and shared helpers.

mod google;
mod hacker_news;
mod reddit;
mod trends;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::types::SourceExcerpt;

pub use google::{GoogleSearchClient, WebSearch};
pub use hacker_news::HackerNewsFetcher;
pub use reddit::RedditFetcher;
pub use trends::TrendSimulator;

/// One trending-content source.
///
/// `fetch` may fail; callers that must not fail go through [`fetch_excerpt`].
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Stable identifier used in logs and in [`SourceExcerpt::source_name`].
    fn name(&self) -> &'static str;

    /// Query the source once and return formatted text, or `""` if it had no results.
    async fn fetch(&self, topic: &str) -> Result<String, SourceError>;
}

/// Runs `fetcher` and converts any failure into an empty excerpt.
///
/// Failures are logged at `warn` and never retried.
pub async fn fetch_excerpt(fetcher: &dyn SourceFetcher, topic: &str) -> SourceExcerpt {
    match fetcher.fetch(topic).await {
        Ok(text) => {
            tracing::debug!(
                source = fetcher.name(),
                topic,
                chars = text.len(),
                "source fetch finished"
            );
            SourceExcerpt {
                source_name: fetcher.name(),
                text,
            }
        }
        Err(e) => {
            tracing::warn!(
                source = fetcher.name(),
                topic,
                error = %e,
                "source fetch failed; treating as empty"
            );
            SourceExcerpt::empty(fetcher.name())
        }
    }
}

/// Builds the HTTP client shared by all outbound source requests.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the underlying `reqwest::Client` cannot be built.
pub fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Renders `items` as a numbered list under `header`, or `""` if there are none.
pub(crate) fn format_numbered(header: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect();
    format!("{header}:\n{}", lines.join("\n"))
}

/// Sends `request`, asserts a 2xx status and parses the body as JSON.
pub(crate) async fn request_json<T: DeserializeOwned>(
    source_name: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            source_name,
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
        context: source_name.to_string(),
        source: e,
    })
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
