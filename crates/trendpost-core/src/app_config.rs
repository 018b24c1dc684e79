use std::net::SocketAddr;

/// Which orchestration strategy produces posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Aggregate sources, then one post call and one image step.
    Pipeline,
    /// Let the model drive a search/image tool loop.
    Agent,
}

impl StrategyKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Pipeline => "pipeline",
            StrategyKind::Agent => "agent",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pipeline" => Ok(StrategyKind::Pipeline),
            "agent" => Ok(StrategyKind::Agent),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'pipeline' or 'agent')"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub strategy: StrategyKind,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub cache_ttl_secs: u64,
    pub agent_max_iterations: usize,
    pub search_max_chars: usize,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_post_model: String,
    pub openrouter_agent_model: String,
    pub together_api_key: Option<String>,
    pub together_base_url: String,
    pub together_image_model: String,
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub google_search_base_url: String,
    pub hacker_news_base_url: String,
    pub reddit_base_url: String,
    pub reddit_subreddit: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("strategy", &self.strategy)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("agent_max_iterations", &self.agent_max_iterations)
            .field("search_max_chars", &self.search_max_chars)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openrouter_base_url", &self.openrouter_base_url)
            .field("openrouter_post_model", &self.openrouter_post_model)
            .field("openrouter_agent_model", &self.openrouter_agent_model)
            .field(
                "together_api_key",
                &self.together_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("together_base_url", &self.together_base_url)
            .field("together_image_model", &self.together_image_model)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "google_cse_id",
                &self.google_cse_id.as_ref().map(|_| "[redacted]"),
            )
            .field("google_search_base_url", &self.google_search_base_url)
            .field("hacker_news_base_url", &self.hacker_news_base_url)
            .field("reddit_base_url", &self.reddit_base_url)
            .field("reddit_subreddit", &self.reddit_subreddit)
            .finish()
    }
}
