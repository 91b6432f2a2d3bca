//! Remote embedding engine calling an OpenAI-compatible embedding API.
//!
//! Works against OpenAI itself or any server exposing `/v1/embeddings`
//! (for example a sentence-transformers server hosting all-MiniLM-L6-v2).
//!
//! Blank texts are never sent; they embed as the zero vector, which has
//! cosine similarity 0 with everything.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::ports::{EmbeddingEngine, EmbeddingError};

/// Configuration for the remote embedding engine.
#[derive(Debug, Clone)]
pub struct RemoteEmbeddingConfig {
    pub base_url: String,
    api_key: Option<Secret<String>>,
    pub model: String,
    pub dimensions: usize,
    pub timeout: Duration,
}

impl RemoteEmbeddingConfig {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            model: model.into(),
            dimensions,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Remote embedding engine.
pub struct RemoteEmbedding {
    client: Client,
    config: RemoteEmbeddingConfig,
}

impl RemoteEmbedding {
    pub fn new(config: RemoteEmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::ModelLoad(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Sets a custom reqwest client (e.g. for testing with `no_proxy()`).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.config.base_url.trim_end_matches('/'))
    }

    async fn post_embeddings(&self, input: Vec<&str>) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let expected = input.len();
        let body = EmbeddingRequest {
            model: &self.config.model,
            input,
        };

        debug!(model = %self.config.model, inputs = expected, "requesting embeddings");

        let mut request = self.client.post(self.embeddings_url()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "embedding request failed");
            EmbeddingError::Inference(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!(%status, "embedding API returned an error");
            return Err(EmbeddingError::Inference(format!(
                "API error {}: {}",
                status, body_text
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Inference(format!("failed to parse response: {}", e)))?;

        if parsed.data.len() != expected {
            return Err(EmbeddingError::Inference(format!(
                "expected {} embeddings, got {}",
                expected,
                parsed.data.len()
            )));
        }

        let mut data: Vec<(usize, Vec<f32>)> = parsed
            .data
            .into_iter()
            .enumerate()
            .map(|(pos, d)| (d.index.unwrap_or(pos), d.embedding))
            .collect();
        data.sort_by_key(|(index, _)| *index);
        let misplaced = data.iter().enumerate().find(|(pos, (index, _))| index != pos);
        if let Some((pos, (index, _))) = misplaced {
            return Err(EmbeddingError::Inference(format!(
                "invalid embedding index {} at position {}",
                index, pos
            )));
        }

        let vectors: Vec<Vec<f32>> = data.into_iter().map(|(_, v)| v).collect();
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.config.dimensions) {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.config.dimensions,
                got: bad.len(),
            });
        }
        Ok(vectors)
    }

    fn zero_vector(&self) -> Vec<f32> {
        vec![0.0; self.config.dimensions]
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[async_trait]
impl EmbeddingEngine for RemoteEmbedding {
    fn name(&self) -> &str {
        "remote"
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if is_blank(text) {
            return Ok(self.zero_vector());
        }
        self.post_embeddings(vec![text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::Inference("empty response data".into()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let to_send: Vec<&str> = texts.iter().copied().filter(|t| !is_blank(t)).collect();
        let fetched = if to_send.is_empty() {
            Vec::new()
        } else {
            self.post_embeddings(to_send).await?
        };
        let mut fetched = fetched.into_iter();

        texts
            .iter()
            .map(|text| {
                if is_blank(text) {
                    Ok(self.zero_vector())
                } else {
                    fetched
                        .next()
                        .ok_or_else(|| EmbeddingError::Inference("missing embedding".into()))
                }
            })
            .collect()
    }
}
