mod generate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendpost_core::StrategyKind;

#[derive(Debug, Parser)]
#[command(name = "trendpost")]
#[command(about = "Generate social media posts from trending topics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a post and image for a niche
    Generate {
        /// Topic or niche to research
        #[arg(long)]
        niche: String,
        /// Orchestration strategy; defaults to `TRENDPOST_STRATEGY`
        #[arg(long)]
        strategy: Option<StrategyKind>,
        /// Print the persisted post record as JSON instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the aggregated source content for a niche without calling any model
    Sources {
        #[arg(long)]
        niche: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = trendpost_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            niche,
            strategy,
            json,
        } => {
            let kind = strategy.unwrap_or(config.strategy);
            generate::run_generate(&config, &niche, kind, json).await?;
        }
        Commands::Sources { niche } => generate::run_sources(&config, &niche).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
