//! Configuration loading: TOML file with environment variable overrides.
//!
//! Every field has a default, so the file is optional. Environment variables
//! take precedence over file values and command-line flags over both.

use std::path::Path;

use posts_core::DEFAULT_ENDPOINT;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote posts collection.
    pub api: ApiConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL of the posts collection.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[source] std::io::Error),
    #[error("failed to parse config file")]
    Parse(#[source] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    /// Load `path` (if present) and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("POSTS_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("POSTS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Check the final configuration after every override was applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an empty or non-HTTP base URL
    /// and for a logging filter that does not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(err) = EnvFilter::try_new(&self.logging.filter) {
            return Err(ConfigError::Validation(format!(
                "invalid logging filter `{}`: {err}",
                self.logging.filter
            )));
        }
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got `{url}`"
            )));
        }
        Ok(())
    }
}
