use bson::doc;
use mongoidx_core::config::StorageConfig;
use mongoidx_core::{NativeCreateRequest, NativeIndexOptions};
use mongoidx_storage::{create_index_store, IndexStore};

fn mock_config() -> StorageConfig {
    StorageConfig {
        provider: "mock".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_factory_creates_mock_store() {
    let store = create_index_store(mock_config()).await.unwrap();

    let request = NativeCreateRequest {
        keys: doc! { "email": 1 },
        options: NativeIndexOptions {
            name: "email_1".to_string(),
            unique: Some(true),
            ..Default::default()
        },
    };

    let name = store.create_index("db", "users", &request).await.unwrap();
    assert_eq!(name, "email_1");

    let indexes = store.list_indexes("db", "users").await.unwrap();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].keys, doc! { "email": 1 });

    assert!(store.drop_index("db", "users", "email_1").await.is_ok());
    assert!(store.list_indexes("db", "users").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_returns_trait_object() {
    let store = create_index_store(mock_config()).await.unwrap();
    let _store: &dyn IndexStore = &*store;
}

#[tokio::test]
async fn test_factory_rejects_unknown_provider() {
    let config = StorageConfig {
        provider: "qdrant".to_string(),
        ..Default::default()
    };

    let result = create_index_store(config).await;
    assert!(result.is_err());
    assert!(result
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
        .contains("Invalid storage provider"));
}

#[tokio::test]
async fn test_factory_requires_url_for_mongodb() {
    let config = StorageConfig::default();

    let result = create_index_store(config).await;
    assert!(result
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
        .contains("Missing Url"));
}
