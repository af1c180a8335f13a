//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

use gitscout_core::git::TargetBranchPolicy;

#[derive(Debug, Parser)]
#[command(name = "gitscout")]
#[command(
    author,
    version,
    about = "MCP tool server exposing pull-request context and web search to AI agents"
)]
pub struct Args {
    /// Git working copy the pull-request tool reads from
    pub repo_root: PathBuf,

    /// Target branch for pull-request comparison
    #[arg(required_unless_present = "auto_detect_branch")]
    pub target_branch: Option<String>,

    /// Detect the target branch from the remote's default-branch ref
    /// instead of naming it
    #[arg(long)]
    pub auto_detect_branch: bool,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Leave the branch diff block out of responses
    #[arg(long)]
    pub no_diff: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Branch resolution strategy selected at startup. An explicit branch
    /// wins over auto-detection when both are given.
    pub fn branch_policy(&self) -> TargetBranchPolicy {
        match &self.target_branch {
            Some(branch) => TargetBranchPolicy::Explicit(branch.clone()),
            None => TargetBranchPolicy::AutoDetect,
        }
    }
}
