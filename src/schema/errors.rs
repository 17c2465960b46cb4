//! Schema error types
//!
//! Error codes:
//! - POSTS_FIELDS_REQUIRED (REJECT)
//! - POSTS_NO_UPDATE_DATA (REJECT)
//!
//! Every schema error is raised before any statement reaches storage.

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A create payload is missing a field or carries an empty one
    FieldsRequired,
    /// An update payload has no present field
    NoUpdateData,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::FieldsRequired => "POSTS_FIELDS_REQUIRED",
            SchemaErrorCode::NoUpdateData => "POSTS_NO_UPDATE_DATA",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejection of an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A create payload with a missing or empty field
    pub fn fields_required() -> Self {
        Self::new(SchemaErrorCode::FieldsRequired, "all fields required")
    }

    /// An update payload with nothing to assign
    pub fn no_update_data() -> Self {
        Self::new(SchemaErrorCode::NoUpdateData, "no data to update")
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Human-readable detail, surfaced verbatim to HTTP callers
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
