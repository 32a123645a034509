//! Conversions between declared tokens and store-native values

use bson::Bson;

use crate::error::{Error, Result};
use crate::model::{Collation, Direction};
use crate::native::NativeCollation;

/// Map a declared direction to the value the store expects in a key document
///
/// `asc` and `desc` become `1` and `-1`; any other token is passed through as
/// a string so special index kinds reach the store unchanged.
pub fn to_native_direction(direction: &Direction) -> Bson {
    match direction {
        Direction::Ascending => Bson::Int32(1),
        Direction::Descending => Bson::Int32(-1),
        Direction::Other(token) => Bson::String(token.clone()),
    }
}

/// Map a store-reported key value back to a declared direction
///
/// Numeric values must be int32 `1` or `-1`. Strings pass through. Anything
/// else is rejected.
pub fn to_declared_direction(raw: &Bson) -> Result<Direction> {
    match raw {
        Bson::Int32(1) => Ok(Direction::Ascending),
        Bson::Int32(-1) => Ok(Direction::Descending),
        Bson::Int32(value) => Err(Error::InvalidDirectionValue { value: *value }),
        Bson::String(token) => Ok(Direction::from(token.as_str())),
        other => Err(Error::UnsupportedDirectionType {
            type_name: format!("{:?}", other.element_type()),
        }),
    }
}

/// Map a declared collation to the store's options, zero-filling unset fields
pub fn to_native_collation(collation: Option<&Collation>) -> Option<NativeCollation> {
    let collation = collation?;
    Some(NativeCollation {
        locale: collation.locale.clone(),
        case_level: collation.case_level.unwrap_or_default(),
        case_first: collation.case_first.clone().unwrap_or_default(),
        strength: collation.strength.unwrap_or_default(),
        numeric_ordering: collation.numeric_ordering.unwrap_or_default(),
        alternate: collation.alternate.clone().unwrap_or_default(),
        max_variable: collation.max_variable.clone().unwrap_or_default(),
        normalization: collation.normalization.unwrap_or_default(),
        backwards: collation.backwards.unwrap_or_default(),
    })
}
