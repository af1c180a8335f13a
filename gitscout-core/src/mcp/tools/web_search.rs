//! Web search tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::mcp::{McpTool, ToolResult};
use crate::search::WebSearcher;
use crate::{Error, Result};

/// Runs a query through the configured search CLI and returns the filtered
/// agent-message text.
pub struct WebSearchTool {
    searcher: WebSearcher,
}

#[derive(Debug, Deserialize)]
struct WebSearchArgs {
    query: String,
}

impl WebSearchTool {
    pub fn new(searcher: WebSearcher) -> Self {
        Self { searcher }
    }
}

#[async_trait]
impl McpTool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web through the configured search CLI. Pass { query: string }."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "Search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<ToolResult> {
        let args: WebSearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::Protocol(format!("Invalid web_search arguments: {e}")))?;

        match self.searcher.search(&args.query).await {
            Ok(body) => Ok(ToolResult::text(body)),
            Err(Error::EmptyQuery) => Ok(ToolResult::error("Search query must not be empty.")),
            Err(Error::SearchFailed { code, detail }) => Ok(ToolResult::error(format!(
                "Error running search ({code}): {detail}"
            ))),
            // Spawn and pipe failures are converted here; nothing escapes
            // the handler boundary.
            Err(e) => Ok(ToolResult::error(format!("Failed to execute search: {e}"))),
        }
    }
}
