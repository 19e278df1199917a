//! Uniform result-or-error envelope returned by every resource call.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Message used when a request never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Message used when the server failed without a `detail` field.
pub const GENERIC_API_ERROR_MESSAGE: &str = "An error occurred";

/// Why a resource call did not yield data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiFailure {
    /// Human-readable message, the server's `detail` when it sent one.
    pub message: String,
    /// HTTP status, absent for transport failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Opaque extra context (the error body, or the transport error text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiFailure {
    /// A failure with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// A transport failure: no response was obtained.
    #[must_use]
    pub fn network(error: impl fmt::Display) -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: None,
            details: Some(Value::String(error.to_string())),
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Outcome of one resource call: either data or a failure, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ApiFailure>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub const fn failed(error: ApiFailure) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&ApiFailure> {
        self.error.as_ref()
    }

    /// Convert into a `Result` for `?`-style handling by callers.
    ///
    /// # Errors
    ///
    /// Returns the recorded [`ApiFailure`].
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Err(ApiFailure::new(GENERIC_API_ERROR_MESSAGE)),
        }
    }

    /// Transform the data while keeping any failure.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T> From<Result<T, ApiFailure>> for ApiResponse<T> {
    fn from(result: Result<T, ApiFailure>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ok_envelope_serializes_data_only() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [1, 2] }));
    }

    #[test]
    fn failed_envelope_serializes_error_only() {
        let response: ApiResponse<()> =
            ApiResponse::failed(ApiFailure::new("Session not found").with_status(404));
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "error": { "message": "Session not found", "status": 404 } })
        );
    }

    #[test]
    fn network_failure_uses_generic_message() {
        let failure = ApiFailure::network("connection refused");
        assert_eq!(failure.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(
            failure.details,
            Some(Value::String("connection refused".into()))
        );
        assert_eq!(failure.to_string(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn into_result_and_map() {
        let response = ApiResponse::ok(2).map(|n| n * 10);
        assert_eq!(response.into_result().unwrap(), 20);

        let response: ApiResponse<i32> = ApiResponse::failed(ApiFailure::new("nope"));
        assert!(!response.is_ok());
        assert_eq!(response.map(|n| n + 1).into_result().unwrap_err().message, "nope");
    }
}
