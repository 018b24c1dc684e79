//! Cache key derivation for generation results, search results and images.

use sha2::{Digest, Sha256};

/// Number of normalized prompt characters kept readable in image keys.
const IMAGE_KEY_PREFIX_CHARS: usize = 50;

/// Lower-cases `input` and collapses every whitespace run to a single `_`.
///
/// Leading and trailing whitespace is dropped, so the function is idempotent:
/// `"Web Dev"`, `"web dev"` and `"  web   dev "` all normalize to `"web_dev"`.
#[must_use]
pub fn normalize_input(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// A namespaced cache key built from normalized input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a full generation response for a niche.
    #[must_use]
    pub fn niche(niche: &str) -> Self {
        Self(format!("niche_{}", normalize_input(niche)))
    }

    /// Key for a web search result.
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self(format!("search_{}", normalize_input(query)))
    }

    /// Key for a generated image.
    ///
    /// Keeps a readable prefix of the prompt and appends a digest of the whole
    /// normalized prompt, so prompts that share their first characters stay distinct.
    #[must_use]
    pub fn image(prompt: &str) -> Self {
        let normalized = normalize_input(prompt);
        let prefix: String = normalized.chars().take(IMAGE_KEY_PREFIX_CHARS).collect();
        let digest = format!("{:x}", Sha256::digest(normalized.as_bytes()));
        Self(format!("image_{prefix}_{}", &digest[..16]))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
