//! Selector configuration

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;

/// Which selection backend is active for the process
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum BackendKind {
    /// Self-hosted fine-tuned model
    #[default]
    Local,
    /// Hosted chat-completion API
    Hosted,
}

impl FromStr for BackendKind {
    type Err = String;

    /// Case-insensitive; accepts the legacy names `standalone` and `openai`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "standalone" => Ok(Self::Local),
            "hosted" | "openai" => Ok(Self::Hosted),
            other => Err(format!(
                "unknown selection backend '{}', expected 'local' or 'hosted'",
                other
            )),
        }
    }
}

impl TryFrom<String> for BackendKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Hosted => write!(f, "hosted"),
        }
    }
}

/// Selection pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Active backend variant
    #[serde(default)]
    pub backend: BackendKind,

    /// Shortlist size handed to the backend
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl SelectorConfig {
    /// Validate selector configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }
        Ok(())
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    5
}
