//! Translation between declared specs and store-native index shapes
//!
//! The translation is asymmetric. Building a create request uses every
//! declared field, while reconstruction only recovers what the store's list
//! output reports in a comparable shape: keys, `sparse`, `unique` and
//! `expireAfterSeconds`. Collation, wildcard projection and background are
//! never reconstructed, so drift in those fields is not observable from a read.

use bson::{Bson, Document};

use crate::error::{Error, Result};
use crate::identity::IndexIdentity;
use crate::mapper::{to_declared_direction, to_native_collation, to_native_direction};
use crate::model::{IndexKey, IndexSpec};
use crate::native::{NativeCreateRequest, NativeIndexDescription, NativeIndexOptions};

/// Build the create request for a declared spec
///
/// Callers guarantee non-empty `keys` and `name`.
pub fn build_create_request(spec: &IndexSpec) -> NativeCreateRequest {
    let keys: Document = spec
        .keys
        .iter()
        .map(|key| (key.field.clone(), to_native_direction(&key.direction)))
        .collect();

    let wildcard_projection = spec.wildcard_projection.as_ref().map(|projection| {
        projection
            .iter()
            .map(|(path, flag)| (path.clone(), Bson::Int32(*flag)))
            .collect::<Document>()
    });

    NativeCreateRequest {
        keys,
        options: NativeIndexOptions {
            name: spec.name.clone(),
            sparse: spec.sparse,
            unique: spec.unique,
            expire_after_seconds: spec.expire_after_seconds,
            wildcard_projection,
            collation: to_native_collation(spec.collation.as_ref()),
            background: spec.background,
        },
    }
}

/// The declared-side view recovered from a native index description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedIndex {
    pub name: String,
    pub keys: Vec<IndexKey>,
    pub sparse: Option<bool>,
    pub unique: Option<bool>,
    pub expire_after_seconds: Option<i32>,
}

impl ReconstructedIndex {
    /// A full spec for `identity`; non-reconstructable fields are absent
    pub fn into_spec(self, identity: &IndexIdentity) -> IndexSpec {
        let mut spec = IndexSpec::new(
            &identity.database,
            &identity.collection,
            &identity.index_name,
            self.keys,
        );
        spec.sparse = self.sparse;
        spec.unique = self.unique;
        spec.expire_after_seconds = self.expire_after_seconds;
        spec
    }

    /// Overlay the reconstructed fields on a prior state
    ///
    /// Identity, collation, wildcard projection and background keep the
    /// values from `state`.
    pub fn apply_to(self, mut state: IndexSpec) -> IndexSpec {
        state.keys = self.keys;
        state.sparse = self.sparse;
        state.unique = self.unique;
        state.expire_after_seconds = self.expire_after_seconds;
        state
    }
}

/// Reconstruct the declared view of a store-reported index
///
/// Fails on the first key whose value cannot be converted, naming the field.
/// No partial result is returned.
pub fn reconstruct_spec(native: &NativeIndexDescription) -> Result<ReconstructedIndex> {
    let keys = native
        .keys
        .iter()
        .map(|(field, raw)| {
            to_declared_direction(raw)
                .map(|direction| IndexKey {
                    field: field.clone(),
                    direction,
                })
                .map_err(|e| Error::invalid_key(field.as_str(), e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ReconstructedIndex {
        name: native.name.clone(),
        keys,
        sparse: native.sparse,
        unique: native.unique,
        expire_after_seconds: native.expire_after_seconds,
    })
}
