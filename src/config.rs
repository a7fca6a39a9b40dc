//! Application configuration.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for the oracle and the stats location, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Seconds before an oracle call is abandoned.
    #[serde(default = "default_oracle_timeout_secs")]
    oracle_timeout_secs: u64,

    /// Directory holding the stats record.
    #[serde(default = "default_stats_dir")]
    stats_dir: PathBuf,
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_oracle_timeout_secs() -> u64 {
    30
}

fn default_stats_dir() -> PathBuf {
    PathBuf::from(".oracle_tictactoe")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            oracle_timeout_secs: default_oracle_timeout_secs(),
            stats_dir: default_stats_dir(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(provider = ?config.llm_provider, model = %config.llm_model, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the stats directory.
    pub fn with_stats_dir(mut self, dir: PathBuf) -> Self {
        self.stats_dir = dir;
        self
    }

    /// Oracle timeout as a [`Duration`].
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Creates LLM configuration from this config.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the provider's API key is not set.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let var = match self.llm_provider {
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        };
        let api_key = std::env::var(var)
            .map_err(|_| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.oracle_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = AppConfig::from_toml(
            "llm_provider = \"anthropic\"\nllm_model = \"claude-3-5-haiku-20241022\"\noracle_timeout_secs = 5\n",
        )
        .unwrap();
        assert_eq!(*config.llm_provider(), LlmProvider::Anthropic);
        assert_eq!(config.llm_model(), "claude-3-5-haiku-20241022");
        assert_eq!(config.oracle_timeout(), Duration::from_secs(5));
        assert_eq!(*config.llm_max_tokens(), 150);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(AppConfig::from_toml("llm_provider = \"nobody\"").is_err());
    }

    #[test]
    fn test_missing_file_defaults() {
        let config = AppConfig::load_or_default("/nonexistent/oracle_tictactoe.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
