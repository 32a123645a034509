//! Configuration for connecting the reconciler to a document store
//!
//! Configuration can be loaded from a TOML file and/or environment variables.
//! The store connection string may also come from `MONGODB_URL`.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::MONGODB_URL_ENV;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.mongoidx/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".mongoidx").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Document store connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type: "mongodb" (default) or "mock"
    #[serde(default = "default_storage_provider")]
    pub provider: String,

    /// Connection string of the MongoDB deployment
    #[serde(default)]
    pub url: Option<String>,

    /// Application name reported to the server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Timeout for establishing a connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Timeout for selecting a server for an operation
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,

    /// Stable API version pinned on the client
    #[serde(default = "default_server_api_version")]
    pub server_api_version: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            url: None,
            app_name: default_app_name(),
            connect_timeout_secs: default_connect_timeout_secs(),
            server_selection_timeout_secs: default_server_selection_timeout_secs(),
            server_api_version: default_server_api_version(),
        }
    }
}

// Connection strings may embed credentials
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("provider", &self.provider)
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("app_name", &self.app_name)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field(
                "server_selection_timeout_secs",
                &self.server_selection_timeout_secs,
            )
            .field("server_api_version", &self.server_api_version)
            .finish()
    }
}

impl StorageConfig {
    /// The connection string to use, failing when none is configured
    pub fn resolve_url(&self) -> Result<&str> {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(Error::config(format!(
                "Missing Url: the client cannot be created as there is a missing or empty value \
                 for the url. Set storage.url in the configuration or use the {MONGODB_URL_ENV} \
                 environment variable"
            ))),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_secs(self.server_selection_timeout_secs)
    }

    /// Whether the in-memory store is selected
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }
}

impl ProviderConfig {
    /// Validates configuration values
    pub fn validate(&self) -> Result<()> {
        let storage = &self.storage;

        if !VALID_STORAGE_PROVIDERS.contains(&storage.provider.as_str()) {
            return Err(Error::config(format!(
                "Invalid storage provider '{}'. Must be one of: {:?}",
                storage.provider, VALID_STORAGE_PROVIDERS
            )));
        }

        if storage.connect_timeout_secs == 0 {
            return Err(Error::config(
                "storage.connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if storage.server_selection_timeout_secs == 0 {
            return Err(Error::config(
                "storage.server_selection_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !VALID_SERVER_API_VERSIONS.contains(&storage.server_api_version.as_str()) {
            return Err(Error::config(format!(
                "Unsupported server API version '{}'. Must be one of: {:?}",
                storage.server_api_version, VALID_SERVER_API_VERSIONS
            )));
        }

        // The mock store never connects
        if !storage.is_mock() {
            storage.resolve_url()?;
        }

        Ok(())
    }
}
