//! Pull-request context gathering from a git working copy
//!
//! Every query is a read; nothing here mutates the repository.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::process::{Invocation, ProcessOutput, ProcessRunner};
use crate::{Error, Result};

/// Repository-relative path of the pull-request template file.
pub const TEMPLATE_PATH: &str = ".github/pull_request_template.md";

/// Substituted when the template file is absent or unreadable.
pub const TEMPLATE_FALLBACK: &str = "No pull request template found.";

/// How the target branch for comparison is chosen. Selected once at
/// startup, never per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetBranchPolicy {
    /// Compare against the branch named by CLI or configuration.
    Explicit(String),
    /// Read the remote's symbolic default-branch ref and strip the
    /// remote-name prefix.
    AutoDetect,
}

/// Everything the pull-request tool reports about a working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    pub current_branch: String,
    pub target_branch: String,
    pub remotes: String,
    pub log: String,
    pub diff: Option<String>,
    pub template: String,
}

/// Read-only git queries against a single working copy.
pub struct RepoInspector {
    runner: Arc<dyn ProcessRunner>,
    root: PathBuf,
}

impl RepoInspector {
    pub fn new(runner: Arc<dyn ProcessRunner>, root: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn git(&self, args: &[&str]) -> Result<ProcessOutput> {
        self.runner
            .run(
                Invocation::new("git")
                    .args(args.iter().copied())
                    .current_dir(&self.root),
            )
            .await
    }

    /// Abbreviated ref name of HEAD.
    pub async fn current_branch(&self) -> Result<String> {
        let out = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if !out.success() {
            return Err(Error::Git(format!(
                "could not resolve HEAD: {}",
                out.stderr.trim()
            )));
        }
        Ok(out.stdout.trim().to_string())
    }

    /// Resolve the comparison branch according to the configured policy.
    pub async fn resolve_target(&self, policy: &TargetBranchPolicy) -> Result<String> {
        match policy {
            TargetBranchPolicy::Explicit(branch) => Ok(branch.clone()),
            TargetBranchPolicy::AutoDetect => {
                let out = self
                    .git(&["symbolic-ref", "--short", "refs/remotes/origin/HEAD"])
                    .await?;
                if !out.success() {
                    return Err(Error::Git(format!(
                        "could not detect the default branch: {}",
                        out.stderr.trim()
                    )));
                }
                Ok(strip_remote_prefix(out.stdout.trim()).to_string())
            }
        }
    }

    /// Gather the full pull-request context for the current branch.
    ///
    /// Branch validation runs first: when the current branch equals the
    /// target, or the target ref does not exist, no content query is issued.
    pub async fn pull_request_context(
        &self,
        policy: &TargetBranchPolicy,
        include_diff: bool,
    ) -> Result<PullRequestContext> {
        let current_branch = self.current_branch().await?;
        let target_branch = self.resolve_target(policy).await?;

        if current_branch == target_branch {
            return Err(Error::SameBranch {
                current: current_branch,
            });
        }

        let verify = self
            .git(&["rev-parse", "--verify", "--quiet", &target_branch])
            .await?;
        if !verify.success() {
            return Err(Error::UnknownBranch {
                target: target_branch,
                current: current_branch,
            });
        }

        let base = {
            let out = self
                .git(&["merge-base", &target_branch, &current_branch])
                .await?;
            if !out.success() {
                return Err(Error::Git(format!(
                    "no merge base between '{target_branch}' and '{current_branch}': {}",
                    out.stderr.trim()
                )));
            }
            out.stdout.trim().to_string()
        };

        // Commits reachable from the current branch but not from the base.
        let log = self
            .git(&["log", &format!("{base}..{current_branch}"), "--oneline"])
            .await?
            .stdout;

        // Three-dot diff: changes introduced on the current branch since it
        // diverged from the merge base, not a direct two-branch diff.
        let diff = if include_diff {
            Some(
                self.git(&["diff", &format!("{target_branch}...{current_branch}")])
                    .await?
                    .stdout,
            )
        } else {
            None
        };

        let remotes = self.git(&["remote", "-v"]).await?.stdout;

        let template = match tokio::fs::read_to_string(self.root.join(TEMPLATE_PATH)).await {
            Ok(text) => text,
            Err(_) => TEMPLATE_FALLBACK.to_string(),
        };

        Ok(PullRequestContext {
            current_branch,
            target_branch,
            remotes,
            log,
            diff,
            template,
        })
    }
}

/// "origin/main" -> "main". Refs without a remote prefix pass through.
fn strip_remote_prefix(short_ref: &str) -> &str {
    match short_ref.split_once('/') {
        Some((_, rest)) => rest,
        None => short_ref,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_remote_prefix() {
        assert_eq!(strip_remote_prefix("origin/main"), "main");
        assert_eq!(strip_remote_prefix("upstream/release/v2"), "release/v2");
        assert_eq!(strip_remote_prefix("main"), "main");
    }
}
