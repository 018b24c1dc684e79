//! Command handlers for `generate` and `sources`.

use std::time::Duration;

use trendpost_core::{AppConfig, GeneratedContent, PostRecord, StrategyKind, Topic};
use trendpost_generator::{build_strategy, Caches};
use trendpost_sources::ContentAggregator;

/// Generate one post for `niche` and print it to stdout.
///
/// # Errors
///
/// Returns an error if the niche is blank, credentials are missing, or generation fails.
/// A failed image is reported in the output, not as an error.
pub(crate) async fn run_generate(
    config: &AppConfig,
    niche: &str,
    kind: StrategyKind,
    json: bool,
) -> anyhow::Result<()> {
    let topic = Topic::parse(niche)?;
    let caches = Caches::in_memory(Duration::from_secs(config.cache_ttl_secs));
    let strategy = build_strategy(config, kind, &caches)?;

    tracing::info!(niche = %topic, strategy = %kind, "generating post");
    let content = strategy.produce_post(&topic).await?;

    if json {
        let record = PostRecord::from_generated(&topic, &content);
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", render_plain(&content));
    }
    Ok(())
}

/// Print the aggregated source text for `niche`.
///
/// # Errors
///
/// Returns an error if the niche is blank or every source came back empty.
pub(crate) async fn run_sources(config: &AppConfig, niche: &str) -> anyhow::Result<()> {
    let topic = Topic::parse(niche)?;
    let aggregator = ContentAggregator::from_config(config)?;
    let content = aggregator.collect(topic.as_str()).await?;

    println!("{}", content.text);
    eprintln!("sources: {}", content.sources.join(", "));
    Ok(())
}

fn render_plain(content: &GeneratedContent) -> String {
    let image_line = match (content.image.image_url(), content.image.error()) {
        (Some(url), _) if url.starts_with("data:") => {
            format!("image: inline data URI ({} bytes)", url.len())
        }
        (Some(url), _) => format!("image: {url}"),
        (None, Some(reason)) => format!("image: unavailable ({reason})"),
        (None, None) => "image: unavailable".to_string(),
    };
    format!("{}\n\n{image_line}", content.post.text)
}
