//! Migration configuration
//!
//! Loaded from a YAML file with top-level `source` and `destination`
//! backend sections.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{MigrateError, Result};

/// One monitoring-backend instance (source or destination)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend API, e.g. `https://tenant.example.com/api`
    pub api_url: String,

    /// API token with permission to read/write configuration
    pub api_token: String,

    /// Accept self-signed TLS certificates (INSECURE - for on-prem setups)
    #[serde(default)]
    pub allow_self_signed_certs: bool,
}

impl BackendConfig {
    /// Base URL with any trailing slashes trimmed, validated as a URL
    pub fn base_url(&self) -> Result<String> {
        let trimmed = self.api_url.trim_end_matches('/');
        url::Url::parse(trimmed)
            .map_err(|e| MigrateError::Config(format!("Invalid api_url '{}': {}", trimmed, e)))?;
        Ok(trimmed.to_string())
    }
}

/// Main migration configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MigratorConfig {
    #[serde(default)]
    pub source: Option<BackendConfig>,
    #[serde(default)]
    pub destination: Option<BackendConfig>,
}

impl MigratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|_| {
            MigrateError::Config(format!("Configuration file '{}' not found", path.display()))
        })?;
        let config: MigratorConfig = serde_yaml::from_str(&content)
            .map_err(|e| MigrateError::Config(format!("Error parsing YAML file: {}", e)))?;
        Ok(config)
    }

    /// The source backend, required for exports
    pub fn source(&self) -> Result<&BackendConfig> {
        self.source
            .as_ref()
            .ok_or_else(|| MigrateError::Config("'source' configuration not found".to_string()))
    }

    /// The destination backend, required for imports
    pub fn destination(&self) -> Result<&BackendConfig> {
        self.destination.as_ref().ok_or_else(|| {
            MigrateError::Config("'destination' configuration not found".to_string())
        })
    }
}
