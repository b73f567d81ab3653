mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use mulled_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config = Config::load()?;

    match cli.command {
        cli::Commands::Hash(args) => commands::hash::handle(args, &config).await,
        cli::Commands::Search(args) => commands::search::handle(args, &config).await,
        cli::Commands::List(args) => commands::list::handle(args, &config).await,
        cli::Commands::Resolve(args) => commands::resolve::handle(args, &config).await,
        cli::Commands::Convert(args) => commands::convert::handle(args, &config).await,
        cli::Commands::ExtractEnv(args) => commands::env::handle_extract(args, &config).await,
        cli::Commands::BuildEnv(args) => commands::env::handle_build(args, &config).await,
        cli::Commands::Test(args) => commands::test::handle(args, &config).await,
    }
}
