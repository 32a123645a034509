#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod error;
mod factory;
mod mock;

// Keep mongo module private
mod mongo;

// Export factory functions
pub use error::StorageError;
pub use factory::create_index_store;
pub use mock::MockIndexStore;
pub use mongo::{MongoIndexStore, MongoIndexStoreBuilder};

use async_trait::async_trait;
use mongoidx_core::{NativeCreateRequest, NativeIndexDescription};

// ==== Traits ====

/// Index operations a document store must offer to the reconciler
///
/// Implementations hold the long-lived connection; callers never close or
/// reconfigure it. Every call is independent and may run concurrently with
/// calls for other indexes.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Submit a create-index request and return the name the store assigned
    async fn create_index(
        &self,
        database: &str,
        collection: &str,
        request: &NativeCreateRequest,
    ) -> Result<String, StorageError>;

    /// Describe every index on a collection
    async fn list_indexes(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<Vec<NativeIndexDescription>, StorageError>;

    /// Drop one index by name
    async fn drop_index(
        &self,
        database: &str,
        collection: &str,
        name: &str,
    ) -> Result<(), StorageError>;
}
