/// Formatted output of one source for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceExcerpt {
    /// Stable source identifier, e.g. `hacker_news`.
    pub source_name: &'static str,
    /// Pre-formatted text. Empty when the source had nothing usable.
    pub text: String,
}

impl SourceExcerpt {
    #[must_use]
    pub fn empty(source_name: &'static str) -> Self {
        Self {
            source_name,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// All non-empty excerpts for a topic joined by blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedContent {
    pub text: String,
    /// Sources that contributed, in invocation order.
    pub sources: Vec<&'static str>,
}
