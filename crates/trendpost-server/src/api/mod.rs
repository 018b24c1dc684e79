mod generate;
mod image;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use trendpost_core::{MemoryStore, TtlStore};
use trendpost_generator::{ImageGenerator, PostStrategy};

use crate::middleware::{enforce_rate_limit, request_id, RateLimiter};

pub use generate::GeneratePostResponse;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the configured strategy lacks credentials.
    pub strategy: Option<Arc<dyn PostStrategy>>,
    /// `None` when no chat model is configured for prompt derivation.
    pub images: Option<Arc<ImageGenerator>>,
    pub responses: Arc<dyn TtlStore<GeneratePostResponse>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        strategy: Option<Arc<dyn PostStrategy>>,
        images: Option<Arc<ImageGenerator>>,
        ttl: Duration,
    ) -> Self {
        Self {
            strategy,
            images,
            responses: Arc::new(MemoryStore::new(ttl)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
    retry_after_secs: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
                retry_after: None,
            },
            retry_after_secs: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn missing_keys() -> Self {
        Self::internal("Missing required API keys")
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: ErrorBody {
                error: "Rate limit exceeded. Please wait before making another request."
                    .to_string(),
                retry_after: Some(format!("{retry_after_secs} seconds")),
            },
            retry_after_secs: Some(retry_after_secs),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(secs) = self.retry_after_secs {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::bad_request("Invalid JSON body")
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
        .expose_headers([header::RETRY_AFTER, HeaderName::from_static("x-request-id")])
}

fn governed_router(rate_limiter: Arc<dyn RateLimiter>) -> Router<AppState> {
    Router::new()
        .route("/api/v1/posts/generate", post(generate::generate_post))
        .route("/api/v1/images/generate", post(image::generate_image))
        .layer(axum::middleware::from_fn_with_state(
            rate_limiter,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limiter: Arc<dyn RateLimiter>) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(governed_router(rate_limiter))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
