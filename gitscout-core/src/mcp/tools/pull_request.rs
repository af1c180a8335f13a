//! Pull-request context tool

use async_trait::async_trait;
use serde_json::Value;

use crate::git::{PullRequestContext, RepoInspector, TargetBranchPolicy};
use crate::mcp::{McpTool, ToolResult};
use crate::{Error, Result};

/// Reports pull-request context for the current branch of a working copy:
/// branches, remotes, commit log, diff and the PR template.
pub struct PullRequestContextTool {
    inspector: RepoInspector,
    policy: TargetBranchPolicy,
    include_diff: bool,
}

impl PullRequestContextTool {
    pub fn new(
        inspector: RepoInspector,
        policy: TargetBranchPolicy,
        include_diff: bool,
    ) -> Self {
        Self {
            inspector,
            policy,
            include_diff,
        }
    }

    /// Labeled text blocks, in presentation order. Labels are delimiters
    /// for the reading agent, not data.
    fn render(context: &PullRequestContext) -> ToolResult {
        let mut blocks = vec![
            format!("---CURRENT BRANCH---\n{}", context.current_branch),
            format!("---TARGET BRANCH---\n{}", context.target_branch),
            format!("---GIT REMOTE---\n{}", context.remotes),
            format!("---GIT LOG---\n{}", context.log),
        ];
        if let Some(diff) = &context.diff {
            blocks.push(format!("---GIT DIFF---\n{diff}"));
        }
        blocks.push(format!("---PR TEMPLATE---\n{}", context.template));
        ToolResult::from_blocks(blocks)
    }
}

#[async_trait]
impl McpTool for PullRequestContextTool {
    fn name(&self) -> &str {
        "get_pull_request_context"
    }

    fn description(&self) -> &str {
        "Get pull request context for the current branch: target branch, remotes, commit log, diff and PR template."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _arguments: Value) -> Result<ToolResult> {
        match self
            .inspector
            .pull_request_context(&self.policy, self.include_diff)
            .await
        {
            Ok(context) => Ok(Self::render(&context)),
            // Branch validation failures stay diagnosable: the current
            // branch is always reported alongside the error.
            Err(Error::SameBranch { current }) => Ok(ToolResult::error_blocks([
                "Error: Current branch and target branch are the same. Cannot create a pull request from the target branch to itself."
                    .to_string(),
                format!("Current branch: {current}"),
            ])),
            Err(Error::UnknownBranch { target, current }) => Ok(ToolResult::error_blocks([
                format!("Error: Target branch '{target}' does not exist."),
                format!("Current branch: {current}"),
            ])),
            Err(e) => Ok(ToolResult::error(format!(
                "Failed to collect pull request context: {e}"
            ))),
        }
    }
}
