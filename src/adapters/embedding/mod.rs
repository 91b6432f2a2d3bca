//! Embedding adapters - implementations of the EmbeddingEngine port.
//!
//! - `RemoteEmbedding` - OpenAI-compatible `/v1/embeddings` API
//! - `HashingEmbedding` - Deterministic lexical hashing, no model required

mod hashing;
mod remote;

pub use hashing::HashingEmbedding;
pub use remote::{RemoteEmbedding, RemoteEmbeddingConfig};
