//! Environment precedence tests.
//!
//! Uses figment::Jail for sandboxed env var manipulation.

use figment::Jail;
use pretty_assertions::assert_eq;
use rag_config::{Backend, ConfigError, RagConfig};

#[test]
fn prefixed_env_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("RAGULATOR_API__BASE_URL", "https://eval.example.com/v1");
        jail.set_env("RAGULATOR_API__BACKEND", "demo");
        jail.set_env("RAGULATOR_DEMO__LATENCY_MS", "250");

        let config = RagConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://eval.example.com/v1");
        assert_eq!(config.api.backend, Backend::Demo);
        assert_eq!(config.demo.latency_ms, 250);
        Ok(())
    });
}

#[test]
fn api_base_url_shorthand_is_honoured() {
    Jail::expect_with(|jail| {
        jail.set_env("API_BASE_URL", "http://10.0.0.5:8000/v1");

        let config = RagConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000/v1");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_shorthand() {
    Jail::expect_with(|jail| {
        jail.set_env("API_BASE_URL", "http://shorthand:8000");
        jail.set_env("RAGULATOR_API__BASE_URL", "http://prefixed:8000");

        let config = RagConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://prefixed:8000");
        Ok(())
    });
}

#[test]
fn invalid_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("RAGULATOR_API__BASE_URL", "localhost:8000");

        let result = RagConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
