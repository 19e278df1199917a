//! Evaluation backend connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default backend base URL, matching the evaluation server's dev address.
fn default_base_url() -> String {
    String::from("http://localhost:8000/v1")
}

/// Which implementation of the resource client to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Talk to the REST backend over HTTP.
    #[default]
    Http,
    /// Serve everything from the in-memory demo backend.
    Demo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout for the HTTP transport. `None` leaves it to reqwest.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub backend: Backend,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            backend: Backend::default(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash, so paths can be appended verbatim.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check that the base URL is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the URL is empty or not http(s).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{url}' is not an http(s) URL"),
            });
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
