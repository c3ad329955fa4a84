//! # Vote Party Configuration
//!
//! Typed configuration for the service core. Values come from built-in defaults,
//! optional YAML files and `VOTE_PARTY__*` environment variables, merged by
//! [`ConfigManager`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vote_party_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let attempts = manager.config().party.max_code_attempts;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::constants::DEFAULT_MAX_CODE_ATTEMPTS;

/// Root configuration structure mirroring vote-party.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VotePartyConfig {
    /// PostgreSQL connection settings (used by the postgres backend)
    pub database: DatabaseConfig,

    /// Act catalog source
    pub catalog: CatalogConfig,

    /// Party lifecycle settings
    pub party: PartyConfig,

    /// Log output settings
    pub logging: LoggingConfig,

    /// Store selection and per-operation deadline
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/vote_party_development".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file shaped as `{"acts": [...]}`
    pub acts_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            acts_path: PathBuf::from("data/acts.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Code draws before creation fails with `CodeGenerationExhausted`
    pub max_code_attempts: u32,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive; falls back to the environment default when unset
    pub level: Option<String>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub store_backend: StoreBackend,
    /// Deadline applied to each service call; 0 disables it
    pub operation_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            operation_timeout_ms: 5_000,
        }
    }
}

impl RuntimeConfig {
    pub fn operation_timeout(&self) -> Option<Duration> {
        (self.operation_timeout_ms > 0).then(|| Duration::from_millis(self.operation_timeout_ms))
    }
}

impl VotePartyConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.party.max_code_attempts == 0 {
            return Err(ConfigurationError::invalid_value(
                "party.max_code_attempts",
                "0",
                "at least one code attempt is required",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                "0",
                "pool size must be greater than 0",
            ));
        }

        if self.runtime.store_backend == StoreBackend::Postgres
            && self.database.url.trim().is_empty()
        {
            return Err(ConfigurationError::missing_required_field(
                "database.url",
                "postgres store backend",
            ));
        }

        if self.catalog.acts_path.as_os_str().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "catalog.acts_path",
                "catalog configuration",
            ));
        }

        Ok(())
    }
}
