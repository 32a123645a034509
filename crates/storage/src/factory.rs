use crate::{mock::MockIndexStore, IndexStore, MongoIndexStoreBuilder};
use mongoidx_core::{config::StorageConfig, Error};
use std::sync::Arc;

/// Creates an index store based on configuration.
///
/// Returns a trait object so the reconciler can be driven by the MongoDB
/// backend or the in-memory store interchangeably.
///
/// # Errors
/// Returns an error if the provider is unknown or the client cannot be built
///
/// # Example
/// ```ignore
/// let mut config = StorageConfig::default();
/// config.url = Some("mongodb://localhost:27017".to_string());
///
/// let store = create_index_store(config).await?;
/// ```
pub async fn create_index_store(config: StorageConfig) -> Result<Arc<dyn IndexStore>, Error> {
    match config.provider.as_str() {
        "mongodb" => {
            let store = MongoIndexStoreBuilder::from_config(config).build().await?;
            Ok(Arc::new(store) as Arc<dyn IndexStore>)
        }
        "mock" => Ok(Arc::new(MockIndexStore::new()) as Arc<dyn IndexStore>),
        other => Err(Error::config(format!(
            "Invalid storage provider '{other}'"
        ))),
    }
}
