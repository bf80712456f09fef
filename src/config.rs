//! Endpoint and model resolution.
//!
//! Four layers, lowest to highest precedence: built-in defaults, a TOML
//! settings file, environment variables, explicit caller overrides. Layers
//! are applied in that order onto [`Settings`]; [`Settings::resolve`] then
//! fills the remaining gaps and validates the endpoint URL.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:1234/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "local-model";

/// Unresolved configuration layers. Unset fields fall through to the next
/// layer down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl Settings {
    /// Read the settings-file layer. The file must exist and parse; hosts
    /// that make the file optional check for it before calling.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Overlay `TASKSENSE_ENDPOINT_URL` and `TASKSENSE_MODEL`. Unset or
    /// empty variables leave the current value in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("TASKSENSE_ENDPOINT_URL")
            && !endpoint.is_empty()
        {
            self.endpoint_url = Some(endpoint);
        }

        if let Ok(model) = std::env::var("TASKSENSE_MODEL")
            && !model.is_empty()
        {
            self.model = Some(model);
        }
    }

    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Fill unset fields with built-in defaults and validate the endpoint.
    pub fn resolve(self) -> Result<EngineConfig, ConfigError> {
        let endpoint = self
            .endpoint_url
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint_url = match Url::parse(&endpoint) {
            Ok(url) => url,
            Err(source) => {
                return Err(ConfigError::InvalidEndpoint {
                    value: endpoint,
                    source,
                });
            }
        };
        Ok(EngineConfig {
            endpoint_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Fully resolved configuration, fixed for the engine's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub endpoint_url: Url,
    pub model: String,
}

impl EngineConfig {
    /// Resolve from environment variables and built-in defaults only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        settings.apply_env_overrides();
        settings.resolve()
    }
}
