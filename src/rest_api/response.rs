//! # Response Formatting
//!
//! Success bodies for the posts resource.

use serde::{Deserialize, Serialize};

/// Create response carrying the generated identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: "post created".to_string(),
            id,
        }
    }
}

/// Confirmation with no further payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn updated() -> Self {
        Self::new("post updated")
    }

    pub fn deleted() -> Self {
        Self::new("post deleted")
    }
}
