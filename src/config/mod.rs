//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TOOL_SELECTOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use tool_selector::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Selection backend: {}", config.selector.backend);
//! ```

mod backend;
mod database;
mod embedding;
mod error;
mod logging;
mod selector;

pub use backend::{HostedBackendConfig, LocalBackendSettings};
pub use database::DatabaseConfig;
pub use embedding::{EmbeddingProvider, EmbeddingSettings};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use selector::{BackendKind, SelectorConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "TOOL_SELECTOR";

/// Variable names used by earlier deployments, mapped to config keys.
///
/// They only fill in defaults; prefixed variables take precedence.
const LEGACY_ENV_ALIASES: &[(&str, &str)] = &[
    ("MAIN_DB_CONNECTION", "database.url"),
    ("LLM_PROVIDER", "selector.backend"),
    ("OPENAI_API_KEY", "hosted.api_key"),
    ("OPENAI_MODEL", "hosted.model"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tool catalog database (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Backend choice and shortlist size
    #[serde(default)]
    pub selector: SelectorConfig,

    /// Hosted chat-completion backend
    #[serde(default)]
    pub hosted: HostedBackendConfig,

    /// Self-hosted model backend
    #[serde(default)]
    pub local: LocalBackendSettings,

    /// Embedding engine used by the ranker
    #[serde(default)]
    pub embedding: EmbeddingSettings,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Applies legacy variables (`MAIN_DB_CONNECTION`, `LLM_PROVIDER`,
    ///    `OPENAI_API_KEY`, `OPENAI_MODEL`) as defaults
    /// 3. Reads environment variables with `TOOL_SELECTOR` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TOOL_SELECTOR__SELECTOR__TOP_K=8` -> `selector.top_k = 8`
    /// - `TOOL_SELECTOR__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        for (var, key) in LEGACY_ENV_ALIASES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats
    /// - Pool size constraints
    /// - Credentials for the active backend
    /// - Shortlist and vector sizes
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first invalid setting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.selector.validate()?;
        match self.selector.backend {
            BackendKind::Hosted => self.hosted.validate(true)?,
            BackendKind::Local => self.local.validate()?,
        }
        self.embedding.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Loads and validates in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}
