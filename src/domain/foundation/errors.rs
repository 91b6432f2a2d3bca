//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Client errors
    InvalidInput,

    // Selection errors
    NoToolsAvailable,
    ToolResolutionFailed,

    // Infrastructure errors
    BackendError,
    StoreUnavailable,
}

impl ErrorCode {
    /// Returns true when the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorCode::InvalidInput | ErrorCode::NoToolsAvailable)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NoToolsAvailable => "NO_TOOLS_AVAILABLE",
            ErrorCode::ToolResolutionFailed => "TOOL_RESOLUTION_FAILED",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("user_prompt");
        assert_eq!(format!("{}", err), "Field 'user_prompt' cannot be empty");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::NoToolsAvailable, "No tools available");
        assert_eq!(format!("{}", err), "[NO_TOOLS_AVAILABLE] No tools available");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ToolResolutionFailed, "unknown tool")
            .with_detail("name", "Calculator");
        assert_eq!(err.details.get("name"), Some(&"Calculator".to_string()));
    }

    #[test]
    fn client_error_classification() {
        assert!(ErrorCode::InvalidInput.is_client_error());
        assert!(ErrorCode::NoToolsAvailable.is_client_error());
        assert!(!ErrorCode::ToolResolutionFailed.is_client_error());
        assert!(!ErrorCode::BackendError.is_client_error());
        assert!(!ErrorCode::StoreUnavailable.is_client_error());
    }
}
