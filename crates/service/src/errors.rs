use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    InvalidType,
    TooSmall,
}

/// One field-level validation failure, serialized into the `details` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: ViolationCode,
    pub message: String,
}

impl FieldViolation {
    pub fn invalid_type(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), code: ViolationCode::InvalidType, message: message.into() }
    }

    pub fn too_small(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), code: ViolationCode::TooSmall, message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Request body that is not valid JSON; carries the parser message.
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}
