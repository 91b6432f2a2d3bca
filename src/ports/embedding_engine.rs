//! Embedding engine port.
//!
//! Computes fixed-length vectors from text. Vectors are only comparable when
//! produced by the same engine, so one engine embeds both the prompt and the
//! tool descriptions of a request.

use async_trait::async_trait;
use thiserror::Error;

/// An engine that computes vector embeddings from text.
#[async_trait]
pub trait EmbeddingEngine: Send + Sync {
    /// Returns the engine name (e.g., "remote", "hashing").
    fn name(&self) -> &str;

    /// Returns the output vector dimensions.
    fn dimensions(&self) -> usize;

    /// Computes an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Computes embedding vectors for a batch of text inputs.
    ///
    /// The output has one vector per input, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Embedding engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
