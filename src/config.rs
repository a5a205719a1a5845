//! Lookup endpoint configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line overrides:
//!
//! ```toml
//! omnisearch_url = "https://portaldev.sph.umich.edu/api/v1/annotation/omnisearch/"
//! api_base_url = "http://127.0.0.1:5000"
//! build = "GRCh38"
//! timeout_seconds = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_OMNISEARCH_URL: &str =
    "https://portaldev.sph.umich.edu/api/v1/annotation/omnisearch/";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_BUILD: &str = "GRCh38";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Where and how upstream lookups are made
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Omnisearch endpoint (term resolver)
    pub omnisearch_url: String,
    /// Base URL of the API serving `/api/gene/{gene_id}/bestvar/`
    pub api_base_url: String,
    /// Genome build passed to omnisearch
    pub build: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            omnisearch_url: DEFAULT_OMNISEARCH_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            build: DEFAULT_BUILD.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl SearchConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, `ConfigError::Toml`
    /// if it is not valid TOML, or `ConfigError::Invalid` if a value is unusable.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for empty URLs or build, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.omnisearch_url.trim().is_empty() {
            return Err(ConfigError::Invalid("omnisearch_url is empty".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base_url is empty".to_string()));
        }
        if self.build.trim().is_empty() {
            return Err(ConfigError::Invalid("build is empty".to_string()));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
