use anyhow::Result;
use clap::Parser;
use depchain::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for JSON output and MCP stdio.
    // Example: RUST_LOG=depchain=debug depchain map.json chain Api1.data
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depchain=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Cli::parse().execute().await
}
