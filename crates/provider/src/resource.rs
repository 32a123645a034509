//! Lifecycle operations for a single declared index
//!
//! An index is either absent or present. There is no in-place update: any
//! change to a declared field is carried out by the host as delete followed by
//! create. Each call is independent and keeps no state between invocations.

use crate::cancel::run_cancellable;
use mongoidx_core::{
    build_create_request, reconstruct_spec, Error, IndexIdentity, IndexSpec, ReconstructedIndex,
    Result,
};
use mongoidx_storage::IndexStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Reconciles one index against the store
///
/// The store handle is shared and read-only from this type's point of view.
/// Concurrent calls for the same identity are not coordinated.
#[derive(Clone)]
pub struct IndexResource {
    store: Arc<dyn IndexStore>,
}

impl IndexResource {
    pub fn new(store: Arc<dyn IndexStore>) -> Self {
        Self { store }
    }

    /// Create the index declared by `spec`
    ///
    /// Returns `spec` with `name` replaced by the name the store assigned,
    /// which may differ from the requested one. A single attempt is made.
    pub async fn create(&self, spec: IndexSpec, cancel: &CancellationToken) -> Result<IndexSpec> {
        let identity = spec.identity();
        debug!(
            database = %spec.database,
            collection = %spec.collection,
            index = %spec.name,
            "Creating index {identity}"
        );

        let request = build_create_request(&spec);
        let name = run_cancellable(
            cancel,
            "create",
            &identity,
            self.store
                .create_index(&spec.database, &spec.collection, &request),
        )
        .await?
        .map_err(|e| Error::IndexCreationFailed {
            identity: identity.encode(),
            source: Box::new(e),
        })?;

        debug!(assigned = %name, "Index {identity} created");
        Ok(IndexSpec { name, ..spec })
    }

    /// Read the current state of the index addressed by `identity`
    ///
    /// Collation, wildcard projection and background are not reported by the
    /// store and come back absent.
    pub async fn read(
        &self,
        identity: &IndexIdentity,
        cancel: &CancellationToken,
    ) -> Result<IndexSpec> {
        let found = self.find(identity, cancel).await?;
        debug!("Read index {identity}");
        Ok(found.into_spec(identity))
    }

    /// Refresh a previously known state from the store
    ///
    /// Keys, `sparse`, `unique` and `expire_after_seconds` are replaced with
    /// what the store reports; every other field keeps its value from `state`.
    /// On error the caller's `state` remains authoritative.
    pub async fn refresh(
        &self,
        state: IndexSpec,
        cancel: &CancellationToken,
    ) -> Result<IndexSpec> {
        let identity = state.identity();
        let found = self.find(&identity, cancel).await?;
        debug!("Refreshed index {identity}");
        Ok(found.apply_to(state))
    }

    /// Reject an in-place update
    ///
    /// Every declared field is immutable, so reaching this path means the host
    /// skipped replacement. Nothing is sent to the store.
    pub fn update(&self, current: &IndexSpec, _desired: &IndexSpec) -> Result<IndexSpec> {
        Err(Error::unexpected_update(current.identity()))
    }

    /// Drop the index addressed by `identity`
    ///
    /// Dropping an index that does not exist is not special-cased; the
    /// store's error is surfaced.
    pub async fn delete(&self, identity: &IndexIdentity, cancel: &CancellationToken) -> Result<()> {
        debug!(
            database = %identity.database,
            collection = %identity.collection,
            index = %identity.index_name,
            "Dropping index {identity}"
        );

        run_cancellable(
            cancel,
            "delete",
            identity,
            self.store.drop_index(
                &identity.database,
                &identity.collection,
                &identity.index_name,
            ),
        )
        .await?
        .map_err(|e| Error::IndexDeletionFailed {
            identity: identity.encode(),
            source: Box::new(e),
        })?;

        debug!("Dropped index {identity}");
        Ok(())
    }

    /// Decode an import token; follow up with [`IndexResource::read`] to populate the spec
    pub fn import_identity(token: &str) -> Result<IndexIdentity> {
        IndexIdentity::decode(token)
    }

    async fn find(
        &self,
        identity: &IndexIdentity,
        cancel: &CancellationToken,
    ) -> Result<ReconstructedIndex> {
        debug!(
            database = %identity.database,
            collection = %identity.collection,
            index = %identity.index_name,
            "Getting index {identity}"
        );

        let indexes = run_cancellable(
            cancel,
            "read",
            identity,
            self.store
                .list_indexes(&identity.database, &identity.collection),
        )
        .await?
        .map_err(|e| Error::IndexListFailed {
            identity: identity.encode(),
            source: Box::new(e),
        })?;

        let found = indexes
            .iter()
            .find(|index| index.name == identity.index_name)
            .ok_or_else(|| Error::index_not_found(identity))?;

        reconstruct_spec(found).map_err(|e| Error::IndexDescriptionInvalid {
            identity: identity.encode(),
            source: Box::new(e),
        })
    }
}
