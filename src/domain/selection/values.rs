//! Selection request and response value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ToolId, ValidationError};

/// A user's free-text request for a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub user_prompt: String,
}

impl SelectionRequest {
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            user_prompt: user_prompt.into(),
        }
    }

    /// Rejects empty or whitespace-only prompts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_prompt.trim().is_empty() {
            return Err(ValidationError::empty_field("user_prompt"));
        }
        Ok(())
    }
}

/// The chosen tool and the generated explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub tool_id: ToolId,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompts_fail_validation() {
        assert!(SelectionRequest::new("").validate().is_err());
        assert!(SelectionRequest::new("  \n\t").validate().is_err());
    }

    #[test]
    fn non_blank_prompt_passes_validation() {
        assert!(SelectionRequest::new("convert this to French").validate().is_ok());
    }

    #[test]
    fn request_deserializes_from_wire_shape() {
        let req: SelectionRequest = serde_json::from_str(r#"{"user_prompt":"hi"}"#).unwrap();
        assert_eq!(req.user_prompt, "hi");
    }

    #[test]
    fn response_serializes_tool_id_as_integer() {
        let resp = SelectionResponse {
            tool_id: ToolId::new(3),
            message: "Use the translator.".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"tool_id": 3, "message": "Use the translator."}));
    }
}
