//! Runner configuration.
//!
//! The runner never reads the process environment itself; it receives a
//! [`RunnerConfig`] built here. `from_env` is only a thin wrapper over
//! `from_lookup` so tests can supply variables from a map.

use std::fmt;

use gemini_client::DEFAULT_BASE_URL;
use thiserror::Error;

/// Variable holding the service access key (required)
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Variable overriding the model identifier
pub const MODEL_VAR: &str = "GEMINI_MODEL";
/// Variable overriding the API base URL
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {var} in .env file.")]
    MissingApiKey { var: &'static str },
}

/// Everything a run needs to reach the service.
#[derive(Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    api_key: String,
    model: String,
    base_url: String,
}

impl RunnerConfig {
    /// Config with default model and endpoint. A blank key is rejected.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey { var: API_KEY_VAR });
        }

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Build from an arbitrary variable lookup. Blank optional values fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            non_blank(API_KEY_VAR).ok_or(ConfigError::MissingApiKey { var: API_KEY_VAR })?,
        )?;
        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model;
        }
        if let Some(base_url) = non_blank(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Build from the process environment (after any env file was loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for RunnerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}
