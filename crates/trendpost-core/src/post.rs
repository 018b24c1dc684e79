use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A user-supplied niche, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    /// Validates a raw niche string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if the input is empty or only whitespace.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("niche"));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Final post text produced by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub text: String,
}

/// Outcome of the image step: one representation or an explicit failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedImage {
    /// Image hosted by the provider.
    Hosted { url: String },
    /// Inline image as a `data:` URI.
    Embedded { data_uri: String },
    /// Image could not be produced; the post is still usable.
    Failed { reason: String },
}

impl GeneratedImage {
    /// Wraps a raw base64 PNG payload as a data URI.
    #[must_use]
    pub fn from_base64(payload: &str) -> Self {
        Self::Embedded {
            data_uri: format!("data:image/png;base64,{payload}"),
        }
    }

    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// The canonical image reference, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Self::Hosted { url } => Some(url),
            Self::Embedded { data_uri } => Some(data_uri),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// A finished post plus its image outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub post: GeneratedPost,
    pub image: GeneratedImage,
}

/// Field values for the document store's `Post` record.
///
/// The store itself is an external collaborator; this is only what it persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub niche: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PostRecord {
    #[must_use]
    pub fn from_generated(niche: &Topic, content: &GeneratedContent) -> Self {
        Self {
            niche: niche.as_str().to_string(),
            content: content.post.text.clone(),
            image_url: content.image.image_url().map(ToOwned::to_owned),
            created_at: Utc::now(),
        }
    }
}
