//! Store-native shapes exchanged with the document store
//!
//! `NativeCreateRequest` is what gets submitted on create, and
//! `NativeIndexDescription` is what the store reports back when listing a
//! collection's indexes. Both are BSON-shaped and carry no declared-side
//! semantics.

use bson::{doc, Bson, Document};

/// Collation options as the store expects them
///
/// Unset options hold their zero value; zero values are left out of the
/// serialised document so the store applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeCollation {
    pub locale: String,
    pub case_level: bool,
    pub case_first: String,
    pub strength: i32,
    pub numeric_ordering: bool,
    pub alternate: String,
    pub max_variable: String,
    pub normalization: bool,
    pub backwards: bool,
}

impl NativeCollation {
    pub fn to_document(&self) -> Document {
        let mut document = doc! { "locale": self.locale.as_str() };
        if self.case_level {
            document.insert("caseLevel", true);
        }
        if !self.case_first.is_empty() {
            document.insert("caseFirst", self.case_first.as_str());
        }
        if self.strength != 0 {
            document.insert("strength", self.strength);
        }
        if self.numeric_ordering {
            document.insert("numericOrdering", true);
        }
        if !self.alternate.is_empty() {
            document.insert("alternate", self.alternate.as_str());
        }
        if !self.max_variable.is_empty() {
            document.insert("maxVariable", self.max_variable.as_str());
        }
        if self.normalization {
            document.insert("normalization", true);
        }
        if self.backwards {
            document.insert("backwards", true);
        }
        document
    }
}

/// Index build options sent alongside the key document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeIndexOptions {
    pub name: String,
    pub sparse: Option<bool>,
    pub unique: Option<bool>,
    pub expire_after_seconds: Option<i32>,
    pub wildcard_projection: Option<Document>,
    pub collation: Option<NativeCollation>,
    pub background: Option<bool>,
}

impl NativeIndexOptions {
    /// Serialise using the store's option names; absent options are omitted
    pub fn to_document(&self) -> Document {
        let mut document = doc! { "name": self.name.as_str() };
        if let Some(sparse) = self.sparse {
            document.insert("sparse", sparse);
        }
        if let Some(unique) = self.unique {
            document.insert("unique", unique);
        }
        if let Some(ttl) = self.expire_after_seconds {
            document.insert("expireAfterSeconds", ttl);
        }
        if let Some(projection) = &self.wildcard_projection {
            document.insert("wildcardProjection", projection.clone());
        }
        if let Some(collation) = &self.collation {
            document.insert("collation", collation.to_document());
        }
        if let Some(background) = self.background {
            document.insert("background", background);
        }
        document
    }
}

/// A complete create-index request: ordered key document plus options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeCreateRequest {
    pub keys: Document,
    pub options: NativeIndexOptions,
}

impl NativeCreateRequest {
    /// The index entry as it appears in a `createIndexes` command
    pub fn to_document(&self) -> Document {
        let mut document = doc! { "key": self.keys.clone() };
        document.extend(self.options.to_document());
        document
    }
}

/// One index as reported by the store's list-indexes call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeIndexDescription {
    pub name: String,
    pub keys: Document,
    pub sparse: Option<bool>,
    pub expire_after_seconds: Option<i32>,
    pub unique: Option<bool>,
}

impl NativeIndexDescription {
    pub fn new(name: impl Into<String>, keys: Document) -> Self {
        Self {
            name: name.into(),
            keys,
            ..Default::default()
        }
    }

    /// The description a store reports right after creating `request`
    pub fn from_request(name: impl Into<String>, request: &NativeCreateRequest) -> Self {
        Self {
            name: name.into(),
            keys: request.keys.clone(),
            sparse: request.options.sparse,
            expire_after_seconds: request.options.expire_after_seconds,
            unique: request.options.unique,
        }
    }
}

/// Default index name the store derives from a key document: `<field>_<value>` joined by `_`
pub fn default_index_name(keys: &Document) -> String {
    keys.iter()
        .map(|(field, value)| {
            let value = match value {
                Bson::String(s) => s.clone(),
                other => other.to_string(),
            };
            format!("{field}_{value}")
        })
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collation_document_skips_zero_values() {
        let collation = NativeCollation {
            locale: "en".to_string(),
            strength: 2,
            backwards: true,
            ..Default::default()
        };
        assert_eq!(
            collation.to_document(),
            doc! { "locale": "en", "strength": 2, "backwards": true }
        );
    }

    #[test]
    fn test_request_document_shape() {
        let request = NativeCreateRequest {
            keys: doc! { "a": 1, "b": -1 },
            options: NativeIndexOptions {
                name: "a_1_b_-1".to_string(),
                unique: Some(true),
                expire_after_seconds: Some(60),
                ..Default::default()
            },
        };
        assert_eq!(
            request.to_document(),
            doc! {
                "key": { "a": 1, "b": -1 },
                "name": "a_1_b_-1",
                "unique": true,
                "expireAfterSeconds": 60,
            }
        );
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(default_index_name(&doc! { "a": 1, "b": -1 }), "a_1_b_-1");
        assert_eq!(
            default_index_name(&doc! { "loc": "2dsphere" }),
            "loc_2dsphere"
        );
    }
}
