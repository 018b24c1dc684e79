use clap::Parser;

use super::*;

#[test]
fn parses_generate_with_defaults() {
    let cli = Cli::try_parse_from(["trendpost", "generate", "--niche", "Next.js"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Generate {
            ref niche,
            strategy: None,
            json: false
        } if niche == "Next.js"
    ));
}

#[test]
fn parses_generate_with_agent_strategy() {
    let cli = Cli::try_parse_from([
        "trendpost",
        "generate",
        "--niche",
        "web dev",
        "--strategy",
        "agent",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Generate {
            strategy: Some(StrategyKind::Agent),
            json: true,
            ..
        }
    ));
}

#[test]
fn rejects_unknown_strategy() {
    let result = Cli::try_parse_from([
        "trendpost",
        "generate",
        "--niche",
        "rust",
        "--strategy",
        "swarm",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_sources_command() {
    let cli = Cli::try_parse_from(["trendpost", "sources", "--niche", "rust"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Sources { ref niche } if niche == "rust"));
}

#[test]
fn generate_requires_niche() {
    assert!(Cli::try_parse_from(["trendpost", "generate"]).is_err());
}
