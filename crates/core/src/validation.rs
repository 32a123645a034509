//! Declared-spec validation performed by the configuration layer
//!
//! The reconciliation path trusts its input; hosts without a schema layer of
//! their own run these checks before handing a spec over.

use crate::error::{Error, Result};
use crate::model::{IndexSpec, TEXT_INDEX_TOKEN};

impl IndexSpec {
    pub fn validate(&self) -> Result<()> {
        for (attribute, value) in [
            ("database", &self.database),
            ("collection", &self.collection),
            ("name", &self.name),
        ] {
            if value.is_empty() {
                return Err(Error::validation(format!("{attribute} must not be empty")));
            }
        }

        if self.keys.is_empty() {
            return Err(Error::validation("keys must contain at least 1 element"));
        }

        for (position, key) in self.keys.iter().enumerate() {
            if key.field.is_empty() {
                return Err(Error::validation(format!(
                    "keys[{position}].field must not be empty"
                )));
            }
            if key.direction.as_token() == TEXT_INDEX_TOKEN {
                return Err(Error::validation(format!(
                    "keys[{position}].type must not be '{TEXT_INDEX_TOKEN}': text indexes are not supported"
                )));
            }
        }

        if let Some(collation) = &self.collation {
            if collation.locale.is_empty() {
                return Err(Error::validation(
                    "collation.locale is required when collation is set",
                ));
            }
        }

        if let Some(ttl) = self.expire_after_seconds {
            if ttl < 0 {
                return Err(Error::validation(format!(
                    "expire_after_seconds must not be negative, got {ttl}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Collation, IndexKey, IndexSpec};

    fn valid() -> IndexSpec {
        IndexSpec::new("db", "coll", "idx", vec![IndexKey::new("a", "asc")])
    }

    #[test]
    fn test_valid_spec() {
        assert!(valid().validate().is_ok());

        let mut geo = valid();
        geo.keys.push(IndexKey::new("loc", "2dsphere"));
        assert!(geo.validate().is_ok());
    }

    #[test]
    fn test_identity_required() {
        let mut spec = valid();
        spec.collection.clear();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("collection must not be empty"));
    }

    #[test]
    fn test_keys_required() {
        let mut spec = valid();
        spec.keys.clear();
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("at least 1 element"));
    }

    #[test]
    fn test_text_kind_rejected() {
        let mut spec = valid();
        spec.keys.push(IndexKey::new("body", "text"));
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("keys[1].type"));
    }

    #[test]
    fn test_collation_locale_required() {
        let mut spec = valid();
        spec.collation = Some(Collation::default());
        assert!(spec.validate().is_err());

        spec.collation = Some(Collation::new("en"));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_negative_ttl_rejected() {
        let mut spec = valid();
        spec.expire_after_seconds = Some(-1);
        assert!(spec.validate().is_err());
    }
}
