//! Search source error types

use thiserror::Error;

/// Errors a search source may report
///
/// A failing source breaks the source contract; the controller logs the
/// failure and treats it as an empty batch.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend answered with an error
    #[error("Search failed: {0}")]
    Failed(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SourceError>;
