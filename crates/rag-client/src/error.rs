//! Client error types.
//!
//! Transport and API failures are not errors at this level: they are folded
//! into [`ApiResponse`](crate::ApiResponse). These are the failures that
//! happen before a request is ever sent.

use thiserror::Error;

/// Errors raised while building a client or validating local input.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// An uploaded file does not have a supported type.
    #[error("invalid file type: '{0}' (expected a .csv file)")]
    InvalidFileType(String),

    /// A CSV upload lacks one or more required header columns.
    #[error("CSV is missing required header(s): {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// The CSV content could not be read.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
