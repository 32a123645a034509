use crate::error::StorageError;
use crate::mongo::MongoIndexStore;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::Client;
use mongoidx_core::config::StorageConfig;
use tracing::info;

/// Builder for MongoIndexStore
pub struct MongoIndexStoreBuilder {
    config: StorageConfig,
}

impl MongoIndexStoreBuilder {
    /// Create a new builder with the given configuration
    pub fn from_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Set the connection string
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Set the application name reported to the server
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.config.app_name = name.into();
        self
    }

    /// Set the connect timeout in seconds
    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    /// Build the client and wrap it in a MongoIndexStore
    ///
    /// The driver connects lazily, so an unreachable deployment surfaces on
    /// the first index operation rather than here.
    pub async fn build(self) -> Result<MongoIndexStore, StorageError> {
        let url = self
            .config
            .resolve_url()
            .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

        let server_api_version = match self.config.server_api_version.as_str() {
            "1" => ServerApiVersion::V1,
            other => {
                return Err(StorageError::InvalidConfig(format!(
                    "Unsupported server API version '{other}'"
                )))
            }
        };

        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| StorageError::InvalidConfig(format!("Invalid connection string: {e}")))?;
        options.app_name = Some(self.config.app_name.clone());
        options.connect_timeout = Some(self.config.connect_timeout());
        options.server_selection_timeout = Some(self.config.server_selection_timeout());
        options.server_api = Some(ServerApi::builder().version(server_api_version).build());

        info!(app_name = %self.config.app_name, "Creating MongoDB client");

        let client = Client::with_options(options)
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Ok(MongoIndexStore::new(client))
    }
}
