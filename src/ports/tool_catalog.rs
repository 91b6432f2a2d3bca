//! Tool catalog port (read side).
//!
//! Read-only access to registered tools. The catalog is written by an
//! external registration process; this service never mutates it.
//!
//! # Design
//!
//! - **Two reads only**: fetch everything, or resolve one tool by name
//! - **Exact resolution**: `find_by_name` compares names byte-for-byte,
//!   with no case folding or whitespace normalization
//! - **Concurrent use**: implementations are shared by all in-flight requests

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::Tool;

/// Reader port for the tool catalog.
#[async_trait]
pub trait ToolCatalog: Send + Sync {
    /// Returns every registered tool.
    ///
    /// Order is implementation-defined; callers must not depend on it.
    async fn list_all(&self) -> Result<Vec<Tool>, CatalogError>;

    /// Resolves a tool by exact name.
    ///
    /// Fails with [`CatalogError::NotFound`] when no tool has exactly this name.
    async fn find_by_name(&self, name: &str) -> Result<Tool, CatalogError>;
}

/// Catalog access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No tool matches the requested name.
    #[error("tool with name '{name}' not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The backing store could not be reached or the query failed.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Creates a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
