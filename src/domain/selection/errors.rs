//! Selection errors - the failure kinds a caller can observe.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{BackendError, CatalogError, EmbeddingError};

/// Errors that abort a selection request.
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The catalog was empty when fetched.
    #[error("No tools available")]
    NoToolsAvailable,

    /// The prompt or the candidate list was unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend named a tool that is not in the catalog.
    #[error("Selected tool '{name}' does not match any catalog entry")]
    ToolResolutionFailed { name: String },

    /// A model call (embedding or generation) failed.
    #[error("Backend error: {0}")]
    BackendError(String),

    /// The catalog store could not be reached.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl SelectionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn resolution_failed(name: impl Into<String>) -> Self {
        Self::ToolResolutionFailed { name: name.into() }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendError(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoToolsAvailable => ErrorCode::NoToolsAvailable,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::ToolResolutionFailed { .. } => ErrorCode::ToolResolutionFailed,
            Self::BackendError(_) => ErrorCode::BackendError,
            Self::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
        }
    }

    /// True for bad-request-class failures, false for internal ones.
    pub fn is_client_error(&self) -> bool {
        self.code().is_client_error()
    }

    /// Maps a catalog failure during the resolve step.
    pub fn from_resolution(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { name } => Self::resolution_failed(name),
            CatalogError::Unavailable(msg) => Self::store_unavailable(msg),
        }
    }
}

impl From<ValidationError> for SelectionError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Catalog failures outside the resolve step are store failures.
impl From<CatalogError> for SelectionError {
    fn from(err: CatalogError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<BackendError> for SelectionError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::InvalidInput(msg) => Self::InvalidInput(msg),
            other => Self::BackendError(other.to_string()),
        }
    }
}

impl From<EmbeddingError> for SelectionError {
    fn from(err: EmbeddingError) -> Self {
        Self::BackendError(format!("embedding failed: {}", err))
    }
}

impl From<SelectionError> for DomainError {
    fn from(err: SelectionError) -> Self {
        let code = err.code();
        let base = DomainError::new(code, err.to_string());
        match err {
            SelectionError::ToolResolutionFailed { name } => base.with_detail("name", name),
            _ => base,
        }
    }
}
