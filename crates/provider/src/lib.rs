//! Reconciliation of declared MongoDB indexes against a live store
//!
//! [`IndexResource`] implements the create, read, refresh, update, delete and
//! import lifecycle for one index. [`plan`] decides what a host should do
//! given the refreshed state and the declared spec.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod cancel;
pub mod plan;
pub mod resource;
pub mod state;

pub use plan::{plan, requires_replacement, PlannedAction};
pub use resource::IndexResource;
pub use state::{ResourceState, PLACEHOLDER_ID};
