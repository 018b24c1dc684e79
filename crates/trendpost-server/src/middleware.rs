use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::{sync::Mutex, time::Instant};
use uuid::Uuid;

use crate::api::ApiError;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Client bucket used when no forwarding header identifies the caller.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: Duration },
}

/// Per-client admission control.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a request from `client_id` if it is admitted.
    async fn check(&self, client_id: &str) -> RateDecision;
}

/// Sliding-window limiter keeping request timestamps per client.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    clients: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl SlidingWindowLimiter {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowLimiter {
    async fn check(&self, client_id: &str) -> RateDecision {
        let now = Instant::now();
        let mut clients = self.clients.lock().await;
        clients.retain(|_, timestamps| {
            timestamps
                .back()
                .is_some_and(|newest| now.duration_since(*newest) < self.window)
        });
        let timestamps = clients.entry(client_id.to_string()).or_default();

        while timestamps
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= self.window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            let oldest = timestamps.front().copied().unwrap_or(now);
            let retry_after = self.window.saturating_sub(now.duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        timestamps.push_back(now);
        RateDecision::Allowed
    }
}

/// Identifies the caller: first `x-forwarded-for` entry, then `x-real-ip`.
pub fn client_id(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Whole seconds until a retry can succeed, never less than one.
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware rejecting clients that exceeded their request window.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<dyn RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_id(req.headers());

    match limiter.check(&client).await {
        RateDecision::Allowed => next.run(req).await,
        RateDecision::Limited { retry_after } => {
            let secs = retry_after_secs(retry_after);
            tracing::warn!(client = %client, retry_after_secs = secs, "rate limit exceeded");
            ApiError::rate_limited(secs).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn client_id_prefers_first_forwarded_address() {
        let map = headers(&[
            ("x-forwarded-for", " 203.0.113.7 , 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(client_id(&map), "203.0.113.7");
    }

    #[test]
    fn client_id_falls_back_to_real_ip_then_unknown() {
        assert_eq!(
            client_id(&headers(&[("x-real-ip", "198.51.100.2")])),
            "198.51.100.2"
        );
        assert_eq!(client_id(&headers(&[("x-forwarded-for", " ")])), UNKNOWN_CLIENT);
        assert_eq!(client_id(&HeaderMap::new()), UNKNOWN_CLIENT);
    }

    #[test]
    fn retry_hint_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_millis(49_500)), 50);
        assert_eq!(retry_after_secs(Duration::from_secs(12)), 12);
        assert_eq!(retry_after_secs(Duration::ZERO), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fourth_request_in_window_is_limited() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60));

        for _ in 0..3 {
            assert_eq!(limiter.check("a").await, RateDecision::Allowed);
            tokio::time::advance(Duration::from_secs(3)).await;
        }

        // Oldest request is 9s old, so it leaves the window in 51s.
        assert_eq!(
            limiter.check("a").await,
            RateDecision::Limited {
                retry_after: Duration::from_secs(51)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn window_slides_past_oldest_request() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60));
        limiter.check("a").await;
        tokio::time::advance(Duration::from_secs(30)).await;
        limiter.check("a").await;
        limiter.check("a").await;
        assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(limiter.check("a").await, RateDecision::Allowed);
        assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_requests_do_not_extend_the_window() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));
        limiter.check("a").await;
        for _ in 0..5 {
            tokio::time::advance(Duration::from_secs(10)).await;
            assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));
        }
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(limiter.check("a").await, RateDecision::Allowed);
    }

    #[tokio::test(start_paused = true)]
    async fn clients_are_limited_independently() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));
        assert_eq!(limiter.check("a").await, RateDecision::Allowed);
        assert_eq!(limiter.check("b").await, RateDecision::Allowed);
        assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_clients_are_forgotten() {
        let limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60));
        for i in 0..1000 {
            let id = format!("10.0.{}.{}", i / 256, i % 256);
            assert_eq!(limiter.check(&id).await, RateDecision::Allowed);
        }
        assert_eq!(limiter.clients.lock().await.len(), 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(limiter.check("fresh").await, RateDecision::Allowed);
        assert_eq!(limiter.clients.lock().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn active_clients_survive_purge() {
        let limiter = SlidingWindowLimiter::new(1, Duration::from_secs(60));
        limiter.check("a").await;
        tokio::time::advance(Duration::from_secs(30)).await;
        limiter.check("b").await;
        assert!(matches!(limiter.check("a").await, RateDecision::Limited { .. }));
        assert_eq!(limiter.clients.lock().await.len(), 2);
    }
}
