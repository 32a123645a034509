//! Identity codec for addressing a single index across systems
//!
//! The external form is `<database>.<collection>.<index_name>`. Components are
//! not escaped, so a component containing a `.` produces a token that does not
//! decode back to the same triple.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const SEPARATOR: char = '.';

/// Addressing key for one index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexIdentity {
    pub database: String,
    pub collection: String,
    pub index_name: String,
}

impl IndexIdentity {
    pub fn new(
        database: impl Into<String>,
        collection: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
            index_name: index_name.into(),
        }
    }

    /// Encode as the dot-joined external token
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode an external token; exactly three non-empty segments are accepted
    pub fn decode(token: &str) -> Result<Self> {
        let segments: Vec<&str> = token.split(SEPARATOR).collect();
        match segments.as_slice() {
            [database, collection, index_name]
                if !database.is_empty() && !collection.is_empty() && !index_name.is_empty() =>
            {
                Ok(Self::new(*database, *collection, *index_name))
            }
            _ => Err(Error::malformed_identity(token)),
        }
    }
}

impl fmt::Display for IndexIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.database, self.collection, self.index_name
        )
    }
}

impl FromStr for IndexIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_joins_with_dots() {
        let id = IndexIdentity::new("shop", "orders", "by_customer");
        assert_eq!(id.encode(), "shop.orders.by_customer");
    }

    #[test]
    fn test_round_trip() {
        for (db, coll, name) in [
            ("a", "b", "c"),
            ("shop", "orders", "customer_1_created_at_-1"),
            ("db-1", "coll_2", "$idx"),
        ] {
            let id = IndexIdentity::new(db, coll, name);
            assert_eq!(IndexIdentity::decode(&id.encode()).unwrap(), id);
        }
    }

    #[test]
    fn test_decode_arity() {
        assert!(matches!(
            IndexIdentity::decode("a.b"),
            Err(Error::MalformedIdentity { .. })
        ));
        assert_eq!(
            IndexIdentity::decode("a.b.c").unwrap(),
            IndexIdentity::new("a", "b", "c")
        );
        assert!(IndexIdentity::decode("a.b.c.d").is_err());
        assert!(IndexIdentity::decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_empty_segments() {
        assert!(IndexIdentity::decode("a..c").is_err());
        assert!(IndexIdentity::decode(".b.c").is_err());
        assert!(IndexIdentity::decode("a.b.").is_err());
    }

    #[test]
    fn test_dotted_component_is_not_round_trippable() {
        let id = IndexIdentity::new("db", "coll", "a.b");
        assert!(IndexIdentity::decode(&id.encode()).is_err());
    }

    #[test]
    fn test_from_str() {
        let id: IndexIdentity = "db.coll.idx".parse().unwrap();
        assert_eq!(id.index_name, "idx");
    }
}
