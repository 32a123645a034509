use thiserror::Error;

/// Result type for index reconciliation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed store-side failure carried as the cause of an operation error
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for index reconciliation operations
///
/// Operation-level variants carry the encoded index identity so a caller can
/// render a diagnostic without any other context. Store failures are kept as
/// the `#[source]` and never rewritten.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Declared specification rejected by validation
    #[error("Invalid index specification: {0}")]
    Validation(String),

    /// Import token did not split into `<database>.<collection>.<index_name>`
    #[error("Invalid id format '{token}'. Should be <database>.<collection>.<index_name>")]
    MalformedIdentity { token: String },

    /// Store-reported key value is neither an int32 nor a string
    #[error("Index key type must be int32 or string, got {type_name}")]
    UnsupportedDirectionType { type_name: String },

    /// Store-reported int32 key value outside of {1, -1}
    #[error("Index key of type int32 must have value 1 or -1, got {value}")]
    InvalidDirectionValue { value: i32 },

    /// Direction conversion failed for a named key field
    #[error("Unable to convert key type for field '{field}': {source}")]
    InvalidKey {
        field: String,
        #[source]
        source: Box<Error>,
    },

    /// No index with the requested name on the collection
    #[error("Unable to find index {identity}: the requested index does not exist")]
    IndexNotFound { identity: String },

    /// The store's description of the index could not be reconstructed
    #[error("Unable to parse fetched index {identity}: {source}")]
    IndexDescriptionInvalid {
        identity: String,
        #[source]
        source: Box<Error>,
    },

    /// Listing the collection's indexes failed
    #[error("Unable to list indexes for {identity}: {source}")]
    IndexListFailed {
        identity: String,
        #[source]
        source: Cause,
    },

    /// The store rejected the create-index request
    #[error("Unable to create index {identity}: {source}")]
    IndexCreationFailed {
        identity: String,
        #[source]
        source: Cause,
    },

    /// The store rejected the drop-index request
    #[error("Unable to drop index {identity}: {source}")]
    IndexDeletionFailed {
        identity: String,
        #[source]
        source: Cause,
    },

    /// An in-place update was requested on an immutable index
    #[error(
        "An update has been triggered for index {identity} when none should have been. \
         Changes in an index always result in its recreation"
    )]
    UnexpectedUpdate { identity: String },

    /// The caller cancelled the operation while the store call was in flight
    #[error("{operation} of index {identity} was cancelled")]
    Cancelled {
        operation: &'static str,
        identity: String,
    },

    /// Storage backend errors outside of a lifecycle operation
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a malformed identity error for the rejected token
    pub fn malformed_identity(token: impl Into<String>) -> Self {
        Self::MalformedIdentity {
            token: token.into(),
        }
    }

    /// Creates an index not found error
    pub fn index_not_found(identity: impl ToString) -> Self {
        Self::IndexNotFound {
            identity: identity.to_string(),
        }
    }

    /// Creates an unexpected update error
    pub fn unexpected_update(identity: impl ToString) -> Self {
        Self::UnexpectedUpdate {
            identity: identity.to_string(),
        }
    }

    /// Creates a cancellation error for the named operation
    pub fn cancelled(operation: &'static str, identity: impl ToString) -> Self {
        Self::Cancelled {
            operation,
            identity: identity.to_string(),
        }
    }

    /// Attaches the offending key field to a direction conversion error
    pub fn invalid_key(field: impl Into<String>, source: Error) -> Self {
        Self::InvalidKey {
            field: field.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error reports a missing index
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IndexNotFound { .. })
    }

    /// Whether this error reports a cancelled operation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_keeps_field_and_source() {
        let err = Error::invalid_key("age", Error::InvalidDirectionValue { value: 0 });
        let msg = err.to_string();
        assert!(msg.contains("'age'"));
        assert!(msg.contains("got 0"));

        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("Index key of type int32 must have value 1 or -1, got 0")
        );
    }

    #[test]
    fn test_malformed_identity_message() {
        let err = Error::malformed_identity("a.b");
        assert_eq!(
            err.to_string(),
            "Invalid id format 'a.b'. Should be <database>.<collection>.<index_name>"
        );
    }

    #[test]
    fn test_predicates() {
        assert!(Error::index_not_found("db.coll.idx").is_not_found());
        assert!(Error::cancelled("create", "db.coll.idx").is_cancelled());
        assert!(!Error::config("x").is_not_found());
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "I/O error: gone");
    }
}
