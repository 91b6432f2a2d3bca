//! Embedding engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::backend::validate_http_url;
use super::error::ValidationError;

/// Embedding engine implementation
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI-compatible embeddings API
    #[default]
    Remote,
    /// Deterministic lexical hashing, no model server
    Hashing,
}

/// Embedding configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    #[serde(default)]
    pub provider: EmbeddingProvider,

    /// Embedding model identity
    #[serde(default = "default_model")]
    pub model: String,

    /// Embeddings API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional bearer token for the embeddings API
    pub api_key: Option<String>,

    /// Vector length produced by the model
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl EmbeddingSettings {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate embedding configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dimensions == 0 {
            return Err(ValidationError::InvalidDimensions);
        }
        if self.provider == EmbeddingProvider::Remote {
            validate_http_url(&self.base_url, "embedding.base_url")?;
            if self.model.trim().is_empty() {
                return Err(ValidationError::MissingRequired("embedding.model"));
            }
            if self.timeout_secs == 0 {
                return Err(ValidationError::InvalidTimeout("embedding.timeout_secs"));
            }
        }
        Ok(())
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::default(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            dimensions: default_dimensions(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:8082".to_string()
}

fn default_dimensions() -> usize {
    384
}

fn default_timeout() -> u64 {
    30
}
