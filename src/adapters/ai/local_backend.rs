//! Local Selection Backend - self-hosted fine-tuned model.
//!
//! The model runs behind a text-generation inference server on the same
//! host or network. Prompts are rendered with the Llama-3 chat template and
//! sent to `POST {endpoint}/generate`; the configured LoRA adapter id is
//! passed with every request.
//!
//! # Model handle
//!
//! `GET {endpoint}/info` is called once, lazily, on first use. The handle
//! lives in a `tokio::sync::OnceCell`, so concurrent first requests share
//! one load and every later request reuses it. A failed load is not cached.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LocalBackendConfig::new(
//!     "http://127.0.0.1:8081",
//!     "meta-llama/Llama-3.1-8B-Instruct",
//! )
//! .with_adapter_id("sft-final-adapter");
//!
//! let backend = LocalSelectionBackend::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::chat_template::{render_user_turn, strip_end_of_turn};
use crate::domain::catalog::Tool;
use crate::domain::selection::{render_explanation_prompt, render_selection_prompt};
use crate::ports::{ensure_candidates, BackendError, SelectionBackend};

const SELECT_MAX_NEW_TOKENS: u32 = 10;
const EXPLAIN_MAX_NEW_TOKENS: u32 = 150;
const EXPLAIN_TEMPERATURE: f32 = 0.7;
const EXPLAIN_TOP_P: f32 = 0.9;

/// Configuration for the local backend.
#[derive(Debug, Clone)]
pub struct LocalBackendConfig {
    /// Base URL of the generation server.
    pub endpoint: String,
    /// Base model the server is expected to host.
    pub model_name: String,
    /// LoRA adapter to apply; `None` uses the base model.
    pub adapter_id: Option<String>,
    pub timeout: Duration,
}

impl LocalBackendConfig {
    pub fn new(endpoint: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model_name: model_name.into(),
            adapter_id: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the adapter id; an empty id means the base model.
    pub fn with_adapter_id(mut self, adapter_id: impl Into<String>) -> Self {
        let id = adapter_id.into();
        self.adapter_id = if id.trim().is_empty() { None } else { Some(id) };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Facts about the loaded model, reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelHandle {
    pub model_id: String,
    #[serde(default, alias = "max_input_length")]
    pub max_input_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters<'a>,
}

#[derive(Debug, Serialize)]
struct GenerateParameters<'a> {
    max_new_tokens: u32,
    do_sample: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    adapter_id: Option<&'a str>,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// Sampling settings for one generation call.
#[derive(Debug, Clone, Copy)]
struct Sampling {
    max_new_tokens: u32,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl Sampling {
    fn greedy(max_new_tokens: u32) -> Self {
        Self {
            max_new_tokens,
            temperature: None,
            top_p: None,
        }
    }

    fn sampled(max_new_tokens: u32, temperature: f32, top_p: f32) -> Self {
        Self {
            max_new_tokens,
            temperature: Some(temperature),
            top_p: Some(top_p),
        }
    }
}

/// Selection backend for a self-hosted fine-tuned model.
pub struct LocalSelectionBackend {
    config: LocalBackendConfig,
    client: Client,
    model: OnceCell<ModelHandle>,
}

impl LocalSelectionBackend {
    pub fn new(config: LocalBackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            client,
            model: OnceCell::new(),
        })
    }

    /// Sets a custom reqwest client (e.g. for testing with `no_proxy()`).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// True once the model handle has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout.as_secs()
    }

    /// Returns the model handle, loading it on first use.
    pub async fn model(&self) -> Result<&ModelHandle, BackendError> {
        self.model.get_or_try_init(|| self.load_model()).await
    }

    async fn load_model(&self) -> Result<ModelHandle, BackendError> {
        let response = self
            .client
            .get(self.url("info"))
            .send()
            .await
            .map_err(|e| BackendError::ModelLoad(format!("model server unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "model server refused info request");
            return Err(BackendError::ModelLoad(format!("status {}: {}", status, body)));
        }

        let handle: ModelHandle = response
            .json()
            .await
            .map_err(|e| BackendError::ModelLoad(format!("invalid info response: {}", e)))?;

        if handle.model_id != self.config.model_name {
            warn!(
                expected = %self.config.model_name,
                served = %handle.model_id,
                "model server hosts a different base model"
            );
        }
        info!(
            model = %handle.model_id,
            adapter = self.config.adapter_id.as_deref().unwrap_or("none"),
            max_input_tokens = ?handle.max_input_tokens,
            "local model loaded"
        );
        Ok(handle)
    }

    async fn generate(&self, content: &str, sampling: Sampling) -> Result<String, BackendError> {
        self.model().await?;

        let inputs = render_user_turn(content);
        let request = GenerateRequest {
            inputs: &inputs,
            parameters: GenerateParameters {
                max_new_tokens: sampling.max_new_tokens,
                do_sample: sampling.temperature.is_some(),
                temperature: sampling.temperature,
                top_p: sampling.top_p,
                adapter_id: self.config.adapter_id.as_deref(),
                return_full_text: false,
            },
        };

        debug!(max_new_tokens = sampling.max_new_tokens, "sending generation request");

        let response = self
            .client
            .post(self.url("generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::from_transport(&e, self.timeout_secs()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "generation request failed");
            return Err(BackendError::from_status(status, &body));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BackendError::parse(format!("Failed to parse response: {}", e)))?;

        let text = strip_end_of_turn(&generated.generated_text).trim();
        if text.is_empty() {
            return Err(BackendError::EmptyCompletion);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl SelectionBackend for LocalSelectionBackend {
    async fn select_best_tool(
        &self,
        user_prompt: &str,
        candidates: &[Tool],
    ) -> Result<String, BackendError> {
        ensure_candidates(candidates)?;
        let content = render_selection_prompt(user_prompt, candidates, false);
        self.generate(&content, Sampling::greedy(SELECT_MAX_NEW_TOKENS))
            .await
    }

    async fn generate_selection_message(
        &self,
        user_prompt: &str,
        tool: &Tool,
    ) -> Result<String, BackendError> {
        let content = render_explanation_prompt(user_prompt, tool);
        self.generate(
            &content,
            Sampling::sampled(EXPLAIN_MAX_NEW_TOKENS, EXPLAIN_TEMPERATURE, EXPLAIN_TOP_P),
        )
        .await
    }

    fn backend_name(&self) -> &str {
        "local"
    }
}
