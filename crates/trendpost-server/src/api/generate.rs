//! `POST /api/v1/posts/generate`: niche in, post plus image out.

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use trendpost_core::{CacheKey, GeneratedContent, Topic};
use trendpost_generator::GenerateError;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GeneratePostRequest {
    #[serde(default)]
    niche: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePostResponse {
    pub content: String,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
    pub niche: String,
    pub strategy: &'static str,
}

impl GeneratePostResponse {
    fn from_generated(niche: &Topic, strategy: &'static str, content: GeneratedContent) -> Self {
        Self {
            image_url: content.image.image_url().map(ToOwned::to_owned),
            image_error: content.image.error().map(ToOwned::to_owned),
            content: content.post.text,
            niche: niche.as_str().to_string(),
            strategy,
        }
    }
}

fn map_generate_error(request_id: &str, error: &GenerateError) -> ApiError {
    match error {
        GenerateError::MissingCredentials(keys) => {
            tracing::error!(request_id, missing = ?keys, "post generation not configured");
            ApiError::missing_keys()
        }
        GenerateError::NoContent(e) => {
            tracing::error!(request_id, error = %e, "no source content");
            ApiError::internal("Failed to generate content")
        }
        other => {
            tracing::error!(request_id, error = %other, "post generation failed");
            ApiError::internal("Failed to generate content")
        }
    }
}

pub(super) async fn generate_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<GeneratePostRequest>, JsonRejection>,
) -> Result<Json<GeneratePostResponse>, ApiError> {
    let Json(body) = body?;
    let niche = Topic::parse(body.niche.as_deref().unwrap_or_default())
        .map_err(|_| ApiError::bad_request("Niche is required"))?;

    let key = CacheKey::niche(niche.as_str());
    if let Some(cached) = state.responses.get(&key).await {
        tracing::info!(request_id = %req_id.0, niche = %niche, "returning cached post");
        return Ok(Json(cached));
    }

    let Some(strategy) = state.strategy.as_ref() else {
        tracing::error!(request_id = %req_id.0, "no post strategy configured");
        return Err(ApiError::missing_keys());
    };

    tracing::info!(
        request_id = %req_id.0,
        niche = %niche,
        strategy = %strategy.kind(),
        "generating post"
    );
    let content = strategy
        .produce_post(&niche)
        .await
        .map_err(|e| map_generate_error(&req_id.0, &e))?;

    let response = GeneratePostResponse::from_generated(&niche, strategy.kind().as_str(), content);
    state.responses.put(key, response.clone()).await;
    Ok(Json(response))
}
