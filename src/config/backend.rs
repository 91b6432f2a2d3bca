//! Selection backend configuration (hosted and local variants)

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted chat-completion API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HostedBackendConfig {
    /// OpenAI API key
    pub api_key: Option<String>,

    /// Chat model name
    #[serde(default = "default_hosted_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_hosted_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_hosted_timeout")]
    pub timeout_secs: u64,
}

impl HostedBackendConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Validate hosted configuration; the key is only required when active
    pub fn validate(&self, active: bool) -> Result<(), ValidationError> {
        if active && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
        }
        validate_http_url(&self.base_url, "hosted.base_url")?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("hosted.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for HostedBackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_hosted_model(),
            base_url: default_hosted_base_url(),
            timeout_secs: default_hosted_timeout(),
        }
    }
}

/// Self-hosted model server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LocalBackendSettings {
    /// Generation server base URL
    #[serde(default = "default_local_endpoint")]
    pub endpoint: String,

    /// Base model expected on the server
    #[serde(default = "default_local_model")]
    pub model_name: String,

    /// LoRA adapter id; empty for the base model
    #[serde(default = "default_adapter_id")]
    pub adapter_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_local_timeout")]
    pub timeout_secs: u64,
}

impl LocalBackendSettings {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate local configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_http_url(&self.endpoint, "local.endpoint")?;
        if self.model_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("local.model_name"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("local.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for LocalBackendSettings {
    fn default() -> Self {
        Self {
            endpoint: default_local_endpoint(),
            model_name: default_local_model(),
            adapter_id: default_adapter_id(),
            timeout_secs: default_local_timeout(),
        }
    }
}

pub(super) fn validate_http_url(url: &str, setting: &'static str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl(setting))
    }
}

fn default_hosted_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_hosted_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_hosted_timeout() -> u64 {
    60
}

fn default_local_endpoint() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_local_model() -> String {
    "meta-llama/Llama-3.1-8B-Instruct".to_string()
}

fn default_adapter_id() -> String {
    "sft-final-adapter".to_string()
}

fn default_local_timeout() -> u64 {
    120
}
