//! Locally synthesized trend angles for a topic.

use async_trait::async_trait;

use super::{format_numbered, SourceFetcher};
use crate::error::SourceError;

const SOURCE_NAME: &str = "trends";
const EMITTED_TRENDS: usize = 3;

/// Produces generic trend angles without any network call, so the aggregate
/// is never empty for a non-empty topic.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendSimulator;

impl TrendSimulator {
    fn candidates(topic: &str) -> [String; 5] {
        [
            format!("Latest {topic} frameworks and tools gaining popularity"),
            format!("{topic} best practices and optimization techniques"),
            format!("Emerging trends in {topic} development"),
            format!("{topic} industry news and updates"),
            format!("Popular {topic} projects and innovations"),
        ]
    }
}

#[async_trait]
impl SourceFetcher for TrendSimulator {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(&self, topic: &str) -> Result<String, SourceError> {
        let trends = Self::candidates(topic);
        Ok(format_numbered("TRENDING TOPICS", &trends[..EMITTED_TRENDS]))
    }
}
