use crate::app_config::{AppConfig, StrategyKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// API credentials are optional here: each route or command decides whether a
/// missing credential is fatal for it.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `.env` templates with `KEY=` lines work.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let bind_addr = or_default("TRENDPOST_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TRENDPOST_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("TRENDPOST_LOG_LEVEL", "info");
    let strategy = or_default("TRENDPOST_STRATEGY", "pipeline")
        .parse::<StrategyKind>()
        .map_err(|reason| invalid("TRENDPOST_STRATEGY", reason))?;

    let http_timeout_secs = parse_u64("TRENDPOST_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TRENDPOST_USER_AGENT", "trendpost/0.1 (post-generator)");

    let rate_limit_max_requests = parse_positive_usize("TRENDPOST_RATE_LIMIT_MAX_REQUESTS", "3")?;
    let rate_limit_window_secs = parse_u64("TRENDPOST_RATE_LIMIT_WINDOW_SECS", "60")?;
    let cache_ttl_secs = parse_u64("TRENDPOST_CACHE_TTL_SECS", "1800")?;
    let agent_max_iterations = parse_positive_usize("TRENDPOST_AGENT_MAX_ITERATIONS", "10")?;
    let search_max_chars = parse_positive_usize("TRENDPOST_SEARCH_MAX_CHARS", "800")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        strategy,
        http_timeout_secs,
        user_agent,
        rate_limit_max_requests,
        rate_limit_window_secs,
        cache_ttl_secs,
        agent_max_iterations,
        search_max_chars,
        openrouter_api_key: optional("OPENROUTER_API_KEY"),
        openrouter_base_url: or_default("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
        openrouter_post_model: or_default(
            "OPENROUTER_POST_MODEL",
            "deepseek/deepseek-r1-0528:free",
        ),
        openrouter_agent_model: or_default(
            "OPENROUTER_AGENT_MODEL",
            "google/gemini-2.0-flash-exp:free",
        ),
        together_api_key: optional("TOGETHER_API_KEY"),
        together_base_url: or_default("TOGETHER_BASE_URL", "https://api.together.xyz/v1"),
        together_image_model: or_default(
            "TOGETHER_IMAGE_MODEL",
            "black-forest-labs/FLUX.1-schnell-Free",
        ),
        google_api_key: optional("GOOGLE_API_KEY"),
        google_cse_id: optional("GOOGLE_CSE_ID"),
        google_search_base_url: or_default(
            "GOOGLE_SEARCH_BASE_URL",
            "https://www.googleapis.com",
        ),
        hacker_news_base_url: or_default("HACKER_NEWS_BASE_URL", "https://hn.algolia.com"),
        reddit_base_url: or_default("REDDIT_BASE_URL", "https://www.reddit.com"),
        reddit_subreddit: or_default("REDDIT_SUBREDDIT", "programming"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
