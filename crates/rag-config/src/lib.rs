//! # rag-config
//!
//! Layered configuration loading for RAGulator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RAGULATOR_*` prefix, `__` as separator)
//! 2. `API_BASE_URL` (shorthand for `api.base_url`)
//! 3. Project-level `.ragulator/config.toml`
//! 4. User-level `~/.config/ragulator/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RAGULATOR_API__BASE_URL` -> `api.base_url`,
//! `RAGULATOR_DEMO__LATENCY_MS` -> `demo.latency_ms`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use rag_config::RagConfig;
//!
//! let config = RagConfig::load_with_dotenv().expect("config");
//! println!("backend at {}", config.api.normalized_base_url());
//! ```

mod api;
mod demo;
mod error;
mod general;

pub use api::{ApiConfig, Backend};
pub use demo::DemoConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RagConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RagConfig {
    /// Merge every source and validate the `api` section. `.env` files are
    /// not read here; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Like [`Self::load`], after exporting the nearest `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_nearest_dotenv();
        Self::load()
    }

    /// Provider chain, lowest priority first.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let files = [Self::user_config_path(), Some(PathBuf::from(".ragulator/config.toml"))];
        for path in files.into_iter().flatten().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::raw()
                .only(&["API_BASE_URL"])
                .map(|_| "api.base_url".into()),
        );

        figment.merge(Env::prefixed("RAGULATOR_").split("__"))
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ragulator").join("config.toml"))
    }

    /// Load the nearest `.env`, searching the working directory and its
    /// ancestors. A missing file is not an error.
    fn load_nearest_dotenv() {
        let Ok(cwd) = std::env::current_dir() else {
            return;
        };
        if let Some(path) = cwd.ancestors().map(|dir| dir.join(".env")).find(|p| p.is_file()) {
            let _ = dotenvy::from_path(path);
        }
    }
}
