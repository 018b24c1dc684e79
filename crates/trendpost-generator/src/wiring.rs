//! Builds strategies and their collaborators from [`AppConfig`].

use std::sync::Arc;
use std::time::Duration;

use trendpost_core::{AppConfig, GeneratedImage, MemoryStore, StrategyKind, TtlStore};
use trendpost_llm::{ChatModel, ImageModel, OpenRouterClient, TogetherImageClient};
use trendpost_sources::{build_http_client, ContentAggregator, GoogleSearchClient};

use crate::agent::{AgentTools, ToolAgent};
use crate::error::GenerateError;
use crate::image::ImageGenerator;
use crate::post::PostGenerator;
use crate::strategy::{AgentStrategy, PipelineStrategy, PostStrategy};

/// Process-wide caches shared by every strategy instance.
#[derive(Clone)]
pub struct Caches {
    pub search: Arc<dyn TtlStore<String>>,
    pub images: Arc<dyn TtlStore<GeneratedImage>>,
}

impl Caches {
    #[must_use]
    pub fn in_memory(ttl: Duration) -> Self {
        Self {
            search: Arc::new(MemoryStore::new(ttl)),
            images: Arc::new(MemoryStore::new(ttl)),
        }
    }
}

/// Names of the environment variables `kind` needs but `config` lacks.
#[must_use]
pub fn missing_credentials(config: &AppConfig, kind: StrategyKind) -> Vec<&'static str> {
    let mut required = vec![("OPENROUTER_API_KEY", config.openrouter_api_key.is_some())];
    if kind == StrategyKind::Agent {
        required.extend([
            ("GOOGLE_API_KEY", config.google_api_key.is_some()),
            ("GOOGLE_CSE_ID", config.google_cse_id.is_some()),
            ("TOGETHER_API_KEY", config.together_api_key.is_some()),
        ]);
    }
    required
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect()
}

fn chat_model(config: &AppConfig, model: &str) -> Result<Arc<dyn ChatModel>, GenerateError> {
    let api_key = config
        .openrouter_api_key
        .as_deref()
        .ok_or_else(|| GenerateError::MissingCredentials(vec!["OPENROUTER_API_KEY"]))?;
    Ok(Arc::new(OpenRouterClient::with_base_url(
        api_key,
        model,
        config.http_timeout_secs,
        &config.openrouter_base_url,
        &config.user_agent,
    )?))
}

/// The image step used by the pipeline and by the image-only endpoint.
///
/// A missing Together key is not an error: the generator then reports
/// `No API key configured` for every image.
///
/// # Errors
///
/// Returns [`GenerateError::MissingCredentials`] without an OpenRouter key, which
/// the prompt-derivation step needs.
pub fn build_image_generator(
    config: &AppConfig,
    caches: &Caches,
) -> Result<ImageGenerator, GenerateError> {
    let chat = chat_model(config, &config.openrouter_post_model)?;
    let images: Option<Arc<dyn ImageModel>> = match config.together_api_key.as_deref() {
        Some(key) => Some(Arc::new(TogetherImageClient::with_base_url(
            key,
            &config.together_image_model,
            config.http_timeout_secs,
            &config.together_base_url,
            &config.user_agent,
        )?)),
        None => {
            tracing::warn!("TOGETHER_API_KEY not set; images will be skipped");
            None
        }
    };
    Ok(ImageGenerator::new(chat, images, Arc::clone(&caches.images)))
}

/// Builds the strategy selected by `kind`.
///
/// # Errors
///
/// - [`GenerateError::MissingCredentials`] if a key `kind` needs is absent.
/// - [`GenerateError::Model`] or [`GenerateError::SourceSetup`] if an HTTP client cannot be built.
pub fn build_strategy(
    config: &AppConfig,
    kind: StrategyKind,
    caches: &Caches,
) -> Result<Arc<dyn PostStrategy>, GenerateError> {
    let missing = missing_credentials(config, kind);
    if !missing.is_empty() {
        return Err(GenerateError::MissingCredentials(missing));
    }

    let images = Arc::new(build_image_generator(config, caches)?);
    match kind {
        StrategyKind::Pipeline => {
            let aggregator = ContentAggregator::from_config(config)?;
            let posts = PostGenerator::new(chat_model(config, &config.openrouter_post_model)?);
            Ok(Arc::new(PipelineStrategy::new(aggregator, posts, images)))
        }
        StrategyKind::Agent => {
            let (Some(api_key), Some(cse_id)) =
                (config.google_api_key.as_deref(), config.google_cse_id.as_deref())
            else {
                return Err(GenerateError::MissingCredentials(vec![
                    "GOOGLE_API_KEY",
                    "GOOGLE_CSE_ID",
                ]));
            };
            let http = build_http_client(config.http_timeout_secs, &config.user_agent)?;
            let search = Arc::new(GoogleSearchClient::new(
                http,
                &config.google_search_base_url,
                api_key,
                cse_id,
            ));
            let tools = AgentTools::new(
                search,
                Arc::clone(&caches.search),
                images,
                config.search_max_chars,
            );
            let chat = chat_model(config, &config.openrouter_agent_model)?;
            Ok(Arc::new(AgentStrategy::new(ToolAgent::new(
                chat,
                tools,
                config.agent_max_iterations,
            ))))
        }
    }
}
