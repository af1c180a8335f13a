//! Error types for gitscout-core

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using gitscout Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for gitscout
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(gitscout::config))]
    Config(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(gitscout::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(gitscout::serde))]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    #[diagnostic(code(gitscout::toml))]
    Toml(#[from] toml::de::Error),

    #[error("Failed to launch '{program}': {message}")]
    #[diagnostic(code(gitscout::spawn))]
    Spawn { program: String, message: String },

    #[error("Git command failed: {0}")]
    #[diagnostic(code(gitscout::git))]
    Git(String),

    #[error("Current branch '{current}' is the same as the target branch")]
    #[diagnostic(code(gitscout::same_branch))]
    SameBranch { current: String },

    #[error("Target branch '{target}' does not exist")]
    #[diagnostic(code(gitscout::unknown_branch))]
    UnknownBranch { target: String, current: String },

    #[error("Search query must not be empty")]
    #[diagnostic(code(gitscout::empty_query))]
    EmptyQuery,

    #[error("Search filter exited with status {code}: {detail}")]
    #[diagnostic(code(gitscout::search))]
    SearchFailed { code: i32, detail: String },

    #[error("Protocol error: {0}")]
    #[diagnostic(code(gitscout::protocol))]
    Protocol(String),
}
