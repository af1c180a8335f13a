//! MCP tools exposed by gitscout

mod pull_request;
mod web_search;

pub use pull_request::PullRequestContextTool;
pub use web_search::WebSearchTool;
