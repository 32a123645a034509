//! Library interface for the mongoidx CLI
//!
//! Command bodies live here so they can be driven against the in-memory store
//! in tests; main.rs only parses arguments and wires up the store.

use anyhow::{Context, Result};
use mongoidx_core::{IndexIdentity, IndexSpec};
use mongoidx_provider::{plan, IndexResource, PlannedAction, ResourceState};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use mongoidx_core::config::ProviderConfig;

/// Load and validate a declared spec, choosing the format by file extension
pub fn load_spec(path: &Path) -> Result<IndexSpec> {
    let spec = IndexSpec::from_file(path)
        .with_context(|| format!("Failed to load spec file {}", path.display()))?;

    spec.validate()
        .with_context(|| format!("Spec {} is invalid", path.display()))?;
    Ok(spec)
}

pub async fn create(
    resource: &IndexResource,
    spec: IndexSpec,
    cancel: &CancellationToken,
) -> Result<ResourceState> {
    let created = resource.create(spec, cancel).await?;
    info!("Created index {}", created.identity());
    Ok(created.into())
}

pub async fn read(
    resource: &IndexResource,
    id: &str,
    cancel: &CancellationToken,
) -> Result<ResourceState> {
    let identity = IndexIdentity::decode(id)?;
    Ok(resource.read(&identity, cancel).await?.into())
}

/// Import an existing index by its id; the state comes from a follow-up read
pub async fn import(
    resource: &IndexResource,
    id: &str,
    cancel: &CancellationToken,
) -> Result<ResourceState> {
    let identity = IndexResource::import_identity(id)?;
    let state = resource
        .read(&identity, cancel)
        .await
        .with_context(|| format!("Failed to import index {identity}"))?;
    info!("Imported index {identity}");
    Ok(state.into())
}

/// Converge the store on `desired`, replacing the index when it differs
pub async fn apply(
    resource: &IndexResource,
    desired: IndexSpec,
    cancel: &CancellationToken,
) -> Result<(PlannedAction, ResourceState)> {
    let current = match resource.refresh(desired.clone(), cancel).await {
        Ok(current) => Some(current),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    let action = plan(current.as_ref(), &desired);
    info!(action = ?action, "Planned index {}", desired.identity());

    let state = match (action, current) {
        (PlannedAction::NoChange, Some(current)) => current,
        (PlannedAction::Replace, _) => {
            resource.delete(&desired.identity(), cancel).await?;
            resource.create(desired, cancel).await?
        }
        _ => resource.create(desired, cancel).await?,
    };

    Ok((action, state.into()))
}

pub async fn delete(resource: &IndexResource, id: &str, cancel: &CancellationToken) -> Result<()> {
    let identity = IndexIdentity::decode(id)?;
    resource.delete(&identity, cancel).await?;
    info!("Dropped index {identity}");
    Ok(())
}
