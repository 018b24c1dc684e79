//! `POST /api/v1/images/generate`: image for an existing post.

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GenerateImageRequest {
    #[serde(default)]
    post: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateImageResponse {
    image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(super) async fn generate_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let Json(body) = body?;
    let post = body
        .post
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Post is required"))?;

    let Some(images) = state.images.as_ref() else {
        tracing::error!(request_id = %req_id.0, "image endpoint not configured");
        return Err(ApiError::missing_keys());
    };

    let image = images.generate_for_post(post).await;
    Ok(Json(GenerateImageResponse {
        image_url: image.image_url().map(ToOwned::to_owned),
        error: image.error().map(ToOwned::to_owned),
    }))
}
