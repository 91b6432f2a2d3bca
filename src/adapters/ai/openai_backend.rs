//! Hosted Selection Backend - OpenAI chat completions.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HostedConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let backend = HostedSelectionBackend::new(config)?;
//! ```
//!
//! Each call is one independent request; failures are reported, not retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::catalog::Tool;
use crate::domain::selection::{
    render_explanation_prompt, render_selection_prompt, EXPLANATION_SYSTEM_PROMPT,
    SELECTION_SYSTEM_PROMPT,
};
use crate::ports::{ensure_candidates, BackendError, SelectionBackend};

/// Configuration for the hosted backend.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HostedConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Generation settings for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Generation {
    system_prompt: &'static str,
    max_tokens: u32,
    temperature: f32,
}

const SELECTION: Generation = Generation {
    system_prompt: SELECTION_SYSTEM_PROMPT,
    max_tokens: 50,
    temperature: 0.1,
};

const EXPLANATION: Generation = Generation {
    system_prompt: EXPLANATION_SYSTEM_PROMPT,
    max_tokens: 200,
    temperature: 0.7,
};

/// OpenAI chat completions backend.
pub struct HostedSelectionBackend {
    config: HostedConfig,
    client: Client,
}

impl HostedSelectionBackend {
    pub fn new(config: HostedConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Sets a custom reqwest client (e.g. for testing with `no_proxy()`).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, user_content: String, generation: Generation) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: generation.system_prompt.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user_content,
                },
            ],
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }

    async fn send_request(&self, request: &OpenAIRequest) -> Result<Response, BackendError> {
        debug!(model = %request.model, max_tokens = request.max_tokens, "sending chat completion");

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::from_transport(&e, self.config.timeout.as_secs()))
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        warn!(%status, model = %self.config.model, "chat completion failed");
        Err(BackendError::from_status(status, &error_body))
    }

    async fn parse_response(&self, response: Response) -> Result<String, BackendError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| BackendError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::parse("No choices in response"))?;

        let content = choice.message.content.unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(BackendError::EmptyCompletion);
        }
        Ok(content.to_string())
    }

    async fn complete(
        &self,
        user_content: String,
        generation: Generation,
    ) -> Result<String, BackendError> {
        let request = self.to_openai_request(user_content, generation);
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl SelectionBackend for HostedSelectionBackend {
    async fn select_best_tool(
        &self,
        user_prompt: &str,
        candidates: &[Tool],
    ) -> Result<String, BackendError> {
        ensure_candidates(candidates)?;
        let content = render_selection_prompt(user_prompt, candidates, true);
        self.complete(content, SELECTION).await
    }

    async fn generate_selection_message(
        &self,
        user_prompt: &str,
        tool: &Tool,
    ) -> Result<String, BackendError> {
        let content = render_explanation_prompt(user_prompt, tool);
        self.complete(content, EXPLANATION).await
    }

    fn backend_name(&self) -> &str {
        "hosted"
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// OpenAI API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
