use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod runner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Args::parse();

    // stdout carries the MCP protocol; all diagnostics go to stderr
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    runner::run(cli).await
}
