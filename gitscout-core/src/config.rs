//! Configuration types for the gitscout server

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the web-search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search-capable executable to invoke.
    #[serde(default = "default_search_binary")]
    pub binary: String,
    /// Model name passed to the search executable.
    #[serde(default = "default_search_model")]
    pub model: String,
    /// Executable that filters the streamed JSON events.
    #[serde(default = "default_filter_binary")]
    pub filter: String,
    /// Instruction prefixed to every query. Prompt wording for the search
    /// collaborator; configurable so it can be localized.
    #[serde(default = "default_instruction")]
    pub instruction: String,
}

fn default_search_binary() -> String {
    "codex".to_string()
}

fn default_search_model() -> String {
    "gpt-5".to_string()
}

fn default_filter_binary() -> String {
    "jq".to_string()
}

fn default_instruction() -> String {
    "必ずweb検索機能を使ってください。".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            binary: default_search_binary(),
            model: default_search_model(),
            filter: default_filter_binary(),
            instruction: default_instruction(),
        }
    }
}

/// Settings for the pull-request context tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Include the branch diff block in responses.
    #[serde(default = "default_include_diff")]
    pub include_diff: bool,
}

fn default_include_diff() -> bool {
    true
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self { include_diff: true }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub context: ContextConfig,
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default locations with cascade:
    /// 1. ./gitscout.toml (local override)
    /// 2. ~/.gitscout/config.toml (global defaults)
    /// 3. Built-in defaults
    pub fn load_default() -> Self {
        if let Ok(config) = Self::from_file("gitscout.toml") {
            return config;
        }

        if let Some(home) = dirs::home_dir() {
            let global_path = home.join(".gitscout").join("config.toml");
            if let Ok(config) = Self::from_file(&global_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gitscout").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServerConfig::parse("").unwrap();
        assert_eq!(config.search.binary, "codex");
        assert_eq!(config.search.model, "gpt-5");
        assert_eq!(config.search.filter, "jq");
        assert!(config.context.include_diff);
    }

    #[test]
    fn test_parse_search_overrides() {
        let toml = r#"
[search]
binary = "codex-nightly"
model = "gpt-5-mini"
"#;
        let config = ServerConfig::parse(toml).unwrap();
        assert_eq!(config.search.binary, "codex-nightly");
        assert_eq!(config.search.model, "gpt-5-mini");
        // Unset fields keep their defaults
        assert_eq!(config.search.filter, "jq");
        assert_eq!(config.search.instruction, default_instruction());
    }

    #[test]
    fn test_parse_context_section() {
        let toml = r#"
[context]
include_diff = false
"#;
        let config = ServerConfig::parse(toml).unwrap();
        assert!(!config.context.include_diff);
    }

    #[test]
    fn test_parse_localized_instruction() {
        let toml = r#"
[search]
instruction = "Always use the web search feature."
"#;
        let config = ServerConfig::parse(toml).unwrap();
        assert_eq!(config.search.instruction, "Always use the web search feature.");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ServerConfig::parse("[search").is_err());
    }

    #[test]
    fn test_global_config_path() {
        let path = ServerConfig::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().ends_with(".gitscout/config.toml"));
    }
}
