mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use trendpost_generator::{build_image_generator, build_strategy, Caches, GenerateError};

use crate::{
    api::{build_app, AppState},
    middleware::SlidingWindowLimiter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendpost_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let ttl = Duration::from_secs(config.cache_ttl_secs);
    let caches = Caches::in_memory(ttl);

    // Missing keys are reported per request rather than failing startup.
    let strategy = match build_strategy(&config, config.strategy, &caches) {
        Ok(strategy) => Some(strategy),
        Err(GenerateError::MissingCredentials(keys)) => {
            tracing::warn!(
                strategy = %config.strategy,
                missing = ?keys,
                "post generation disabled"
            );
            None
        }
        Err(e) => return Err(e.into()),
    };
    let images = match build_image_generator(&config, &caches) {
        Ok(generator) => Some(Arc::new(generator)),
        Err(GenerateError::MissingCredentials(keys)) => {
            tracing::warn!(missing = ?keys, "image endpoint disabled");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    let app = build_app(AppState::new(strategy, images, ttl), limiter);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        strategy = %config.strategy,
        "trendpost server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
