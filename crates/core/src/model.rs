//! Declared index specification
//!
//! These types describe the desired state of a single index as stated by the
//! configuration layer. Every field is immutable once the index exists: any
//! change is realised by dropping and recreating the index.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::identity::IndexIdentity;

/// Direction token reserved for full-text indexes, which this resource does not manage
pub const TEXT_INDEX_TOKEN: &str = "text";

/// Declared per-field ordering or index kind
///
/// `Other` carries store-specific index kinds (`2dsphere`, `hashed`, ...)
/// verbatim so they round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    Ascending,
    Descending,
    Other(String),
}

impl Direction {
    /// The declared token for this direction
    pub fn as_token(&self) -> &str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
            Direction::Other(token) => token,
        }
    }
}

impl From<&str> for Direction {
    fn from(token: &str) -> Self {
        match token {
            "asc" => Direction::Ascending,
            "desc" => Direction::Descending,
            other => Direction::Other(other.to_string()),
        }
    }
}

impl From<String> for Direction {
    fn from(token: String) -> Self {
        match token.as_str() {
            "asc" => Direction::Ascending,
            "desc" => Direction::Descending,
            _ => Direction::Other(token),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Other(token) => token,
            known => known.as_token().to_string(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// One field of a (possibly compound) index, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexKey {
    /// Name of the indexed field
    pub field: String,

    /// Ordering or index kind for this field
    #[serde(rename = "type")]
    pub direction: Direction,
}

impl IndexKey {
    pub fn new(field: impl Into<String>, direction: impl Into<Direction>) -> Self {
        Self {
            field: field.into(),
            direction: direction.into(),
        }
    }
}

/// Locale-aware string comparison rules applied by an index
///
/// When present, `locale` is mandatory. Absent optional fields mean "use the
/// store default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collation {
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_level: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_ordering: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalization: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backwards: Option<bool>,
}

impl Collation {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Default::default()
        }
    }
}

/// Declared state of one index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Database holding the collection
    pub database: String,

    /// Collection the index is built on
    pub collection: String,

    /// Index name
    pub name: String,

    /// Indexed fields; order defines the compound key order
    pub keys: Vec<IndexKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sparse: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Document TTL in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_after_seconds: Option<i32>,

    /// Field inclusion/exclusion for wildcard indexes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_projection: Option<BTreeMap<String, i32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<Collation>,

    /// Build the index in the background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<bool>,
}

impl IndexSpec {
    /// A spec with the identity triple and keys set and every option absent
    pub fn new(
        database: impl Into<String>,
        collection: impl Into<String>,
        name: impl Into<String>,
        keys: Vec<IndexKey>,
    ) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            name: name.into(),
            keys,
            sparse: None,
            unique: None,
            expire_after_seconds: None,
            wildcard_projection: None,
            collation: None,
            background: None,
        }
    }

    /// The identity triple addressing this index
    pub fn identity(&self) -> IndexIdentity {
        IndexIdentity::new(&self.database, &self.collection, &self.name)
    }

    /// Loads a declared spec from TOML content
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::validation(format!("Failed to parse TOML spec: {e}")))
    }

    /// Loads a declared spec from JSON content
    pub fn from_json_str(content: &str) -> crate::Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| crate::Error::validation(format!("Failed to parse JSON spec: {e}")))
    }

    /// Loads a declared spec from a `.toml` or `.json` file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(crate::Error::validation(format!(
                "Unsupported spec file {}: expected a .toml or .json extension",
                path.display()
            ))),
        }
    }
}
