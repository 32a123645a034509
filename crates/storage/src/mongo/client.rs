//! MongoDB-backed index store

use crate::error::StorageError;
use crate::mongo::convert::{to_description, to_index_model};
use crate::IndexStore;
use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use mongoidx_core::{NativeCreateRequest, NativeIndexDescription};
use tracing::debug;

/// Index store talking to a MongoDB deployment through a shared client
///
/// The client is cheap to clone and safe for concurrent use; this store never
/// closes or reconfigures it.
#[derive(Clone)]
pub struct MongoIndexStore {
    client: Client,
}

impl MongoIndexStore {
    /// Wrap an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn collection(&self, database: &str, collection: &str) -> Collection<Document> {
        self.client.database(database).collection(collection)
    }
}

#[async_trait]
impl IndexStore for MongoIndexStore {
    async fn create_index(
        &self,
        database: &str,
        collection: &str,
        request: &NativeCreateRequest,
    ) -> Result<String, StorageError> {
        let model = to_index_model(request)?;

        let result = self
            .collection(database, collection)
            .create_index(model, None)
            .await?;

        debug!(
            database,
            collection,
            index = %result.index_name,
            "createIndexes acknowledged"
        );
        Ok(result.index_name)
    }

    async fn list_indexes(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<NativeIndexDescription>, StorageError> {
        let cursor = self
            .collection(database, collection)
            .list_indexes(None)
            .await?
            .with_type::<Document>();
        let entries: Vec<Document> = cursor.try_collect().await?;

        debug!(database, collection, count = entries.len(), "Listed indexes");
        entries.into_iter().map(to_description).collect()
    }

    async fn drop_index(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<(), StorageError> {
        self.collection(database, collection)
            .drop_index(name, None)
            .await?;
        Ok(())
    }
}
