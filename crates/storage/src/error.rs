use mongoidx_core::Error as CoreError;
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    /// Driver failure, kept intact so callers can inspect its kind and code
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),
}

impl From<bson::de::Error> for StorageError {
    fn from(err: bson::de::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_driver_error_is_kept_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let driver: mongodb::error::Error = io.into();

        let err = StorageError::from(driver);
        assert!(matches!(err, StorageError::Driver(_)));

        let source = err.source().unwrap();
        let driver = source.downcast_ref::<mongodb::error::Error>().unwrap();
        assert!(matches!(*driver.kind, mongodb::error::ErrorKind::Io(_)));
    }
}
