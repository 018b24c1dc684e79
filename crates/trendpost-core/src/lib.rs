//! Shared types, configuration and cache primitives for trendpost.

pub mod app_config;
pub mod cache_key;
pub mod config;
pub mod post;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, StrategyKind};
pub use cache_key::{normalize_input, CacheKey};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use post::{GeneratedContent, GeneratedImage, GeneratedPost, PostRecord, Topic};
pub use store::{MemoryStore, TtlStore};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}
