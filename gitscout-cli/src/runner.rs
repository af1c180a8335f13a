//! Server assembly and stdio serve loop

use std::sync::Arc;

use anyhow::Result;
use tokio::io::BufReader;

use gitscout_core::config::ServerConfig;
use gitscout_core::git::RepoInspector;
use gitscout_core::mcp::{self, McpServer};
use gitscout_core::mcp::tools::{PullRequestContextTool, WebSearchTool};
use gitscout_core::process::{ProcessRunner, SystemRunner};
use gitscout_core::search::WebSearcher;

use crate::args::Args;

/// Build the server from arguments and configuration, then serve stdin
/// until EOF.
pub async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::load_default(),
    };
    if args.no_diff {
        config.context.include_diff = false;
    }

    let policy = args.branch_policy();
    tracing::info!(
        root = %args.repo_root.display(),
        ?policy,
        "starting gitscout"
    );

    // The tools report a structured error when a binary is missing; warning
    // up front makes the misconfiguration visible before the first call.
    for binary in [
        config.search.binary.as_str(),
        config.search.filter.as_str(),
    ] {
        if which::which(binary).is_err() {
            tracing::warn!(
                "'{binary}' not found on PATH; the web_search tool will report an error when called"
            );
        }
    }

    let runner: Arc<dyn ProcessRunner> = Arc::new(SystemRunner);
    let inspector = RepoInspector::new(Arc::clone(&runner), &args.repo_root);
    let searcher = WebSearcher::new(runner, config.search.clone());

    let mut server = McpServer::new("gitscout", env!("CARGO_PKG_VERSION"));
    server.register(Arc::new(PullRequestContextTool::new(
        inspector,
        policy,
        config.context.include_diff,
    )));
    server.register(Arc::new(WebSearchTool::new(searcher)));

    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    mcp::serve(&server, reader, writer).await?;

    Ok(())
}
