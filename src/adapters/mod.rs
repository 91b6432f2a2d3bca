//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Tool catalog over PostgreSQL
//! - `memory` - In-memory tool catalog
//! - `ai` - Selection backends (hosted, local, mock)
//! - `embedding` - Embedding engines (remote, hashing)

pub mod ai;
pub mod embedding;
pub mod memory;
pub mod postgres;

pub use ai::{
    HostedConfig, HostedSelectionBackend, LocalBackendConfig, LocalSelectionBackend,
    MockSelectionBackend,
};
pub use embedding::{HashingEmbedding, RemoteEmbedding, RemoteEmbeddingConfig};
pub use memory::InMemoryToolCatalog;
pub use postgres::PostgresToolCatalog;
