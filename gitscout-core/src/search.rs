//! Web search through an external search-capable CLI
//!
//! The search process emits line-delimited JSON events; a second process
//! filters that stream down to the text of agent-message events. The two
//! run concurrently over a live pipe.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::process::{Invocation, ProcessRunner};
use crate::{Error, Result};

/// jq program that keeps only agent-message events and emits their text
/// payload; reasoning traces and tool-call records are dropped.
const AGENT_MESSAGE_FILTER: &str =
    r#"fromjson? | select(.msg?.type=="agent_message") | .msg.message"#;

/// Body substituted when the filtered stream is empty.
pub const NO_RESULTS: &str = "No results.";

/// Runs queries through the configured search and filter executables.
pub struct WebSearcher {
    runner: Arc<dyn ProcessRunner>,
    config: SearchConfig,
}

impl WebSearcher {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: SearchConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query through the search process and the agent-message filter.
    ///
    /// Empty queries are rejected before any process is spawned. The filter
    /// process's exit code decides success; on failure the best available
    /// diagnostic text (stderr, then stdout) is carried in the error.
    pub async fn search(&self, query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let producer = Invocation::new(self.config.binary.as_str())
            .arg("--search")
            .arg("--model")
            .arg(self.config.model.as_str())
            .arg("exec")
            .arg("--json")
            .arg(format!("{}\n{}", self.config.instruction, query));
        let consumer = Invocation::new(self.config.filter.as_str())
            .arg("-Rr")
            .arg(AGENT_MESSAGE_FILTER);

        tracing::debug!(query, "running web search");
        let output = self.runner.pipe(producer, consumer).await?;

        if !output.success() {
            let stderr = output.stderr.trim();
            let detail = if stderr.is_empty() {
                output.stdout.trim()
            } else {
                stderr
            };
            return Err(Error::SearchFailed {
                code: output.code,
                detail: detail.to_string(),
            });
        }

        let body = output.stdout.trim();
        if body.is_empty() {
            Ok(NO_RESULTS.to_string())
        } else {
            Ok(body.to_string())
        }
    }
}
