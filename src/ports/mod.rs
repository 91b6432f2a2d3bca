//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ToolCatalog` - Read access to registered tools
//! - `EmbeddingEngine` - Text to vector embedding
//! - `SelectionBackend` - Language model that picks and explains a tool

mod embedding_engine;
mod selection_backend;
mod tool_catalog;

pub use embedding_engine::{EmbeddingEngine, EmbeddingError};
pub use selection_backend::{ensure_candidates, BackendError, SelectionBackend};
pub use tool_catalog::{CatalogError, ToolCatalog};
