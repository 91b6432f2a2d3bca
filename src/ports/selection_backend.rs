//! Selection Backend Port - language-model capability used for the final pick.
//!
//! A backend turns `(prompt, candidates)` into the name of one candidate and
//! `(prompt, tool)` into a short conversational explanation. Exactly one
//! implementation is active per process; which one is a deployment choice.
//!
//! # Contract
//!
//! - `select_best_tool` uses low-temperature generation with a small output
//!   budget and returns only a tool name, trimmed of surrounding whitespace
//! - `generate_selection_message` uses sampled generation with a larger
//!   budget and answers in the language of the user's prompt
//! - An empty candidate list fails with [`BackendError::InvalidInput`]
//!   before any generation happens
//! - Failed generation calls are reported, never retried internally

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::Tool;

/// Port for the language-model backend that chooses and explains tools.
#[async_trait]
pub trait SelectionBackend: Send + Sync {
    /// Picks the most appropriate candidate for the prompt and returns its name.
    async fn select_best_tool(
        &self,
        user_prompt: &str,
        candidates: &[Tool],
    ) -> Result<String, BackendError>;

    /// Explains, conversationally, why `tool` fits the prompt.
    async fn generate_selection_message(
        &self,
        user_prompt: &str,
        tool: &Tool,
    ) -> Result<String, BackendError>;

    /// Short identifier of the backend variant (e.g., "hosted", "local").
    fn backend_name(&self) -> &str;
}

/// Rejects empty candidate lists before any generation call.
pub fn ensure_candidates(candidates: &[Tool]) -> Result<(), BackendError> {
    if candidates.is_empty() {
        return Err(BackendError::InvalidInput(
            "no candidate tools provided".to_string(),
        ));
    }
    Ok(())
}

/// Selection backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Caller handed the backend something it cannot work with.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rate limited by provider.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model produced no text.
    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// The local model could not be loaded.
    #[error("model load failed: {0}")]
    ModelLoad(String),
}

impl BackendError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Maps a reqwest transport failure, preserving timeouts.
    pub fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {}", err))
        } else {
            Self::network(err.to_string())
        }
    }

    /// Maps a non-success HTTP status and body to an error.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationFailed,
            429 => Self::RateLimited(body.to_string()),
            500..=599 => Self::unavailable(format!("Server error {}: {}", status, body)),
            _ => Self::network(format!("Unexpected status {}: {}", status, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_candidates_rejects_empty_list() {
        let err = ensure_candidates(&[]).unwrap_err();
        assert!(matches!(err, BackendError::InvalidInput(_)));
    }

    #[test]
    fn ensure_candidates_accepts_non_empty_list() {
        let tools = vec![Tool::new(1, "calculator", "1.0.0")];
        assert!(ensure_candidates(&tools).is_ok());
    }

    #[test]
    fn status_mapping_covers_common_failures() {
        use reqwest::StatusCode;

        assert_eq!(
            BackendError::from_status(StatusCode::UNAUTHORIZED, ""),
            BackendError::AuthenticationFailed
        );
        assert!(matches!(
            BackendError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            BackendError::RateLimited(_)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            BackendError::Unavailable(_)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::IM_A_TEAPOT, ""),
            BackendError::Network(_)
        ));
        assert!(matches!(
            BackendError::from_status(StatusCode::BAD_REQUEST, "bad model"),
            BackendError::Network(_)
        ));
    }

    #[test]
    fn backend_error_displays_correctly() {
        let err = BackendError::Timeout { timeout_secs: 30 };
        assert_eq!(err.to_string(), "request timed out after 30s");

        let err = BackendError::EmptyCompletion;
        assert_eq!(err.to_string(), "model returned an empty completion");
    }
}
