//! Cross-cutting error types for RAGulator.
//!
//! Transport and API failures never surface as Rust errors: the resource
//! client folds them into its response envelope. What remains here are the
//! local failures raised before any request is made.

use thiserror::Error;

/// Errors that can be raised by any RAGulator crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed local validation (range, format, required fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
