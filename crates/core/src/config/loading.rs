//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::defaults::*;
use super::{global_config_path, ProviderConfig};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl ProviderConfig {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `MONGOIDX_` and use double underscores
    /// for nested values, e.g. `MONGOIDX_STORAGE__PROVIDER=mock`. `MONGODB_URL`
    /// supplies `storage.url` when neither the file nor the environment sets it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // The config crate doesn't apply serde defaults for missing sections
        let builder =
            set_config_default(builder, "storage.provider", default_storage_provider())?;
        let builder = set_config_default(builder, "storage.app_name", default_app_name())?;
        let builder = set_config_default(
            builder,
            "storage.connect_timeout_secs",
            default_connect_timeout_secs() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "storage.server_selection_timeout_secs",
            default_server_selection_timeout_secs() as i64,
        )?;
        let mut builder = set_config_default(
            builder,
            "storage.server_api_version",
            default_server_api_version(),
        )?;

        // MONGODB_URL is only a fallback; storage.url from the file or MONGOIDX_* wins
        if let Ok(url) = std::env::var(MONGODB_URL_ENV) {
            if !url.is_empty() {
                builder = builder
                    .set_default("storage.url", url)
                    .map_err(|e| Error::config(format!("Failed to set {MONGODB_URL_ENV}: {e}")))?;
            }
        }

        // Add the config file if it exists
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults, with `storage.url` taken from MONGODB_URL
    /// 2. Config file (~/.mongoidx/config.toml or custom --config path)
    /// 3. Environment variables (MONGOIDX_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
