//! In-memory index store for testing

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::error::StorageError;
use crate::IndexStore;
use async_trait::async_trait;
use mongoidx_core::native::default_index_name;
use mongoidx_core::{NativeCreateRequest, NativeIndexDescription};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct MockData {
    collections: HashMap<(String, String), Vec<NativeIndexDescription>>, // (db, coll) -> indexes
    requests: Vec<NativeCreateRequest>, // every create request received
    mutations: usize,
    fail_create: Option<String>,
    fail_list: Option<String>,
    fail_drop: Option<String>,
    assigned_name: Option<String>,
    latency: Option<Duration>,
}

/// In-memory index store
///
/// Mirrors the store behaviours the reconciler depends on: the store picks
/// the name when none is requested, listing a missing collection fails, and
/// dropping a missing index fails. Clones share the same data.
#[derive(Clone, Default)]
pub struct MockIndexStore {
    data: Arc<Mutex<MockData>>,
}

impl MockIndexStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing index, creating the collection if needed
    pub fn seed_index(&self, database: &str, collection: &str, index: NativeIndexDescription) {
        let mut data = self.data.lock().unwrap();
        data.collections
            .entry((database.to_string(), collection.to_string()))
            .or_default()
            .push(index);
    }

    /// Register an empty collection
    pub fn seed_collection(&self, database: &str, collection: &str) {
        let mut data = self.data.lock().unwrap();
        data.collections
            .entry((database.to_string(), collection.to_string()))
            .or_default();
    }

    /// Make every create call fail with the given message
    pub fn fail_create(&self, message: impl Into<String>) {
        self.data.lock().unwrap().fail_create = Some(message.into());
    }

    /// Make every list call fail with the given message
    pub fn fail_list(&self, message: impl Into<String>) {
        self.data.lock().unwrap().fail_list = Some(message.into());
    }

    /// Make every drop call fail with the given message
    pub fn fail_drop(&self, message: impl Into<String>) {
        self.data.lock().unwrap().fail_drop = Some(message.into());
    }

    /// Assign this name to created indexes regardless of the requested one
    pub fn assign_name(&self, name: impl Into<String>) {
        self.data.lock().unwrap().assigned_name = Some(name.into());
    }

    /// Delay every call by `latency` before it takes effect
    pub fn set_latency(&self, latency: Duration) {
        self.data.lock().unwrap().latency = Some(latency);
    }

    /// Number of completed create and drop calls
    pub fn mutation_count(&self) -> usize {
        self.data.lock().unwrap().mutations
    }

    /// Create requests received so far, in order
    pub fn create_requests(&self) -> Vec<NativeCreateRequest> {
        self.data.lock().unwrap().requests.clone()
    }

    /// Current indexes of a collection
    pub fn indexes(&self, database: &str, collection: &str) -> Vec<NativeIndexDescription> {
        let data = self.data.lock().unwrap();
        data.collections
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    async fn delay(&self) {
        let latency = self.data.lock().unwrap().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl IndexStore for MockIndexStore {
    async fn create_index(
        &self,
        database: &str,
        collection: &str,
        request: &NativeCreateRequest,
    ) -> Result<String, StorageError> {
        self.delay().await;
        let mut data = self.data.lock().unwrap();
        data.requests.push(request.clone());

        if let Some(message) = &data.fail_create {
            return Err(StorageError::BackendError(message.clone()));
        }

        let name = match &data.assigned_name {
            Some(name) => name.clone(),
            None if request.options.name.is_empty() => default_index_name(&request.keys),
            None => request.options.name.clone(),
        };

        let indexes = data
            .collections
            .entry((database.to_string(), collection.to_string()))
            .or_default();

        if let Some(existing) = indexes.iter().find(|index| index.name == name) {
            // Same definition under the same name is a no-op for the store
            if existing.keys == request.keys {
                return Ok(name);
            }
            return Err(StorageError::BackendError(format!(
                "Index with name: {name} already exists with different options"
            )));
        }

        indexes.push(NativeIndexDescription::from_request(name.clone(), request));
        data.mutations += 1;
        Ok(name)
    }

    async fn list_indexes(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<NativeIndexDescription>, StorageError> {
        self.delay().await;
        let data = self.data.lock().unwrap();

        if let Some(message) = &data.fail_list {
            return Err(StorageError::BackendError(message.clone()));
        }

        data.collections
            .get(&(database.to_string(), collection.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::BackendError(format!("ns does not exist: {database}.{collection}")))
    }

    async fn drop_index(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<(), StorageError> {
        self.delay().await;
        let mut data = self.data.lock().unwrap();

        if let Some(message) = &data.fail_drop {
            return Err(StorageError::BackendError(message.clone()));
        }

        let indexes = data
            .collections
            .get_mut(&(database.to_string(), collection.to_string()))
            .ok_or_else(|| {
                StorageError::BackendError(format!("ns not found: {database}.{collection}"))
            })?;

        let before = indexes.len();
        indexes.retain(|index| index.name != name);
        if indexes.len() == before {
            return Err(StorageError::IndexNotFound(format!(
                "index not found with name [{name}]"
            )));
        }

        data.mutations += 1;
        Ok(())
    }
}
