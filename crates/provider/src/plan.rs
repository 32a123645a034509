//! Replace-only planning for hosts driving the lifecycle

use mongoidx_core::IndexSpec;

/// What a host must do to move the store towards the declared spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// The index is absent
    Create,
    /// The store already matches the declared spec
    NoChange,
    /// The index differs; delete it, then create the declared one
    Replace,
}

/// Every declared field is immutable, so any change forces recreation
pub fn requires_replacement(_current: &IndexSpec, _desired: &IndexSpec) -> bool {
    true
}

/// Plan the transition from the refreshed `current` state to `desired`
///
/// `current` is expected to come from refreshing `desired`, so fields the
/// store does not report (collation, wildcard projection, background) carry
/// the desired values and never trigger a replacement.
pub fn plan(current: Option<&IndexSpec>, desired: &IndexSpec) -> PlannedAction {
    match current {
        None => PlannedAction::Create,
        Some(current) if !differs(current, desired) => PlannedAction::NoChange,
        // No field can be updated in place
        Some(_) => PlannedAction::Replace,
    }
}

fn differs(current: &IndexSpec, desired: &IndexSpec) -> bool {
    // The store omits false flags from its index descriptions
    fn flag(value: Option<bool>) -> bool {
        value.unwrap_or(false)
    }

    current.database != desired.database
        || current.collection != desired.collection
        || current.name != desired.name
        || current.keys != desired.keys
        || flag(current.sparse) != flag(desired.sparse)
        || flag(current.unique) != flag(desired.unique)
        || current.expire_after_seconds != desired.expire_after_seconds
        || current.wildcard_projection != desired.wildcard_projection
        || current.collation != desired.collation
        || current.background != desired.background
}
