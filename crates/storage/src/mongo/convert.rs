//! Conversions between the reconciler's native shapes and driver types

use crate::error::StorageError;
use bson::{Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use mongoidx_core::{NativeCreateRequest, NativeIndexDescription};

/// Build the driver's index model from a create request
///
/// Options go through the driver's own deserializer so option names and
/// collation enums are interpreted exactly as the server expects them.
pub(crate) fn to_index_model(request: &NativeCreateRequest) -> Result<IndexModel, StorageError> {
    let options: IndexOptions = bson::from_document(request.options.to_document())?;

    Ok(IndexModel::builder()
        .keys(request.keys.clone())
        .options(options)
        .build())
}

/// Flatten one raw `listIndexes` entry into the description the translator reads
///
/// Entries are read field by field so an option the driver cannot model does
/// not hide the rest of the entry. `name` and `key` are required.
pub(crate) fn to_description(raw: Document) -> Result<NativeIndexDescription, StorageError> {
    let name = raw
        .get_str("name")
        .map_err(|e| StorageError::SerializationError(format!("index entry has no name: {e}")))?
        .to_string();

    let keys = raw
        .get_document("key")
        .map_err(|e| {
            StorageError::SerializationError(format!("index {name} has no key document: {e}"))
        })?
        .clone();

    let flag = |field: &str| -> Result<Option<bool>, StorageError> {
        match raw.get(field) {
            None => Ok(None),
            Some(Bson::Boolean(value)) => Ok(Some(*value)),
            Some(other) => Err(StorageError::SerializationError(format!(
                "index {name} has a non-boolean {field}: {other}"
            ))),
        }
    };

    let expire_after_seconds = raw
        .get("expireAfterSeconds")
        .map(|ttl| to_ttl_seconds(&name, ttl))
        .transpose()?;

    Ok(NativeIndexDescription {
        sparse: flag("sparse")?,
        unique: flag("unique")?,
        name,
        keys,
        expire_after_seconds,
    })
}

/// Legacy shells wrote TTLs as doubles; only integral values in i32 range are accepted
fn to_ttl_seconds(name: &str, ttl: &Bson) -> Result<i32, StorageError> {
    let out_of_range = || {
        StorageError::SerializationError(format!(
            "index {name} has an unsupported expireAfterSeconds: {ttl}"
        ))
    };

    match ttl {
        Bson::Int32(secs) => Ok(*secs),
        Bson::Int64(secs) => i32::try_from(*secs).map_err(|_| out_of_range()),
        Bson::Double(secs)
            if secs.fract() == 0.0
                && *secs >= f64::from(i32::MIN)
                && *secs <= f64::from(i32::MAX) =>
        {
            Ok(*secs as i32)
        }
        _ => Err(out_of_range()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use mongoidx_core::{NativeCollation, NativeIndexOptions};
    use std::time::Duration;

    #[test]
    fn test_to_index_model_carries_options() {
        let request = NativeCreateRequest {
            keys: doc! { "a": 1, "b": -1 },
            options: NativeIndexOptions {
                name: "a_b".to_string(),
                unique: Some(true),
                expire_after_seconds: Some(120),
                wildcard_projection: None,
                collation: Some(NativeCollation {
                    locale: "fr".to_string(),
                    strength: 2,
                    ..Default::default()
                }),
                ..Default::default()
            },
        };

        let model = to_index_model(&request).unwrap();
        assert_eq!(model.keys, doc! { "a": 1, "b": -1 });

        let options = model.options.unwrap();
        assert_eq!(options.name.as_deref(), Some("a_b"));
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.sparse, None);
        assert_eq!(options.expire_after, Some(Duration::from_secs(120)));
        assert_eq!(options.collation.map(|c| c.locale), Some("fr".to_string()));
    }

    #[test]
    fn test_to_index_model_rejects_unknown_collation_token() {
        let request = NativeCreateRequest {
            keys: doc! { "a": 1 },
            options: NativeIndexOptions {
                name: "a_1".to_string(),
                collation: Some(NativeCollation {
                    locale: "en".to_string(),
                    case_first: "sideways".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        };

        assert!(matches!(
            to_index_model(&request),
            Err(StorageError::SerializationError(_))
        ));
    }

    #[test]
    fn test_to_description_reads_raw_entry() {
        let description = to_description(doc! {
            "v": 2,
            "key": { "created_at": 1, "user": -1 },
            "name": "ttl_idx",
            "expireAfterSeconds": 30,
            "sparse": true,
        })
        .unwrap();

        assert_eq!(description.name, "ttl_idx");
        assert_eq!(description.keys, doc! { "created_at": 1, "user": -1 });
        assert_eq!(description.expire_after_seconds, Some(30));
        assert_eq!(description.sparse, Some(true));
        assert_eq!(description.unique, None);
    }

    #[test]
    fn test_to_description_accepts_legacy_ttl_encodings() {
        let from_double = to_description(doc! {
            "v": 2,
            "key": { "a": 1 },
            "name": "a_1",
            "expireAfterSeconds": 30.0,
            "unique": true,
        })
        .unwrap();
        assert_eq!(from_double.name, "a_1");
        assert_eq!(from_double.expire_after_seconds, Some(30));
        assert_eq!(from_double.unique, Some(true));

        let from_long = to_description(doc! {
            "key": { "a": 1 },
            "name": "a_1",
            "expireAfterSeconds": 45_i64,
        })
        .unwrap();
        assert_eq!(from_long.expire_after_seconds, Some(45));
    }

    #[test]
    fn test_to_description_rejects_bad_entries() {
        assert!(matches!(
            to_description(doc! { "key": { "a": 1 } }),
            Err(StorageError::SerializationError(_))
        ));
        assert!(matches!(
            to_description(doc! { "key": { "a": 1 }, "name": "a_1", "expireAfterSeconds": 1.5 }),
            Err(StorageError::SerializationError(_))
        ));
        assert!(matches!(
            to_description(doc! { "name": "a_1" }),
            Err(StorageError::SerializationError(_))
        ));
    }
}
