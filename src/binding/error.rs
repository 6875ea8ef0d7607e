//! Form binding error types

use thiserror::Error;

/// Errors that can occur when binding to or writing a form record
#[derive(Debug, Error)]
pub enum FormError {
    /// A record must be a JSON object
    #[error("Form record must be a JSON object, got {0}")]
    NotAnObject(String),

    /// The bound field does not exist in the record
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// The record refused a patch
    #[error("Record patch rejected: {0}")]
    PatchRejected(String),
}

/// Result type for form binding operations
pub type Result<T> = std::result::Result<T, FormError>;
