//! Core types for reconciling declared document-store indexes
//!
//! This crate provides the pure side of index reconciliation:
//!
//! - **Model**: the declared index specification and its identity triple
//! - **Mapper**: declared direction and collation tokens to store-native values
//! - **Identity**: the `<database>.<collection>.<index>` import token codec
//! - **Translate**: create requests from specs, declared views from store output
//! - **Configuration**: store connection settings
//! - **Error handling**: unified error types
//!

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod identity;
pub mod mapper;
pub mod model;
pub mod native;
pub mod translate;
mod validation;

// Re-export main types for convenience
pub use config::{ProviderConfig, StorageConfig};
pub use error::{Error, Result};
pub use identity::IndexIdentity;
pub use model::{Collation, Direction, IndexKey, IndexSpec, TEXT_INDEX_TOKEN};
pub use native::{NativeCollation, NativeCreateRequest, NativeIndexDescription, NativeIndexOptions};
pub use translate::{build_create_request, reconstruct_spec, ReconstructedIndex};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Result;
    pub use crate::identity::IndexIdentity;
    pub use crate::model::{Direction, IndexKey, IndexSpec};
}
