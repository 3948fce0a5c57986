//! Standardized API response envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plain acknowledgement: `{ "success": true }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Informational response carrying only a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body: a short message, plus structured details for client-correctable
/// failures such as validation issues.
///
/// Internal failure causes never appear here; they are logged server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn invalid_input(details: Value) -> Self {
        Self::new("Invalid input").with_details(details)
    }

    pub fn invalid_post_id() -> Self {
        Self::new("Invalid post ID")
    }

    pub fn post_not_found() -> Self {
        Self::new("Post not found")
    }
}
