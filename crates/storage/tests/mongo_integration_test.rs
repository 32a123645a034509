//! Integration tests for the MongoDB index store
//!
//! These tests require a running MongoDB instance reachable through MONGODB_URL.
//! Run with: MONGODB_URL=mongodb://localhost:27017 cargo test --package mongoidx-storage -- --ignored

use bson::doc;
use mongoidx_core::config::StorageConfig;
use mongoidx_core::{build_create_request, Collation, IndexKey, IndexSpec};
use mongoidx_storage::{IndexStore, MongoIndexStore, MongoIndexStoreBuilder};

const DATABASE: &str = "mongoidx_it";

async fn connect() -> MongoIndexStore {
    let url = std::env::var("MONGODB_URL").expect("MONGODB_URL must be set for integration tests");
    MongoIndexStoreBuilder::from_config(StorageConfig::default())
        .url(url)
        .app_name("mongoidx-it")
        .build()
        .await
        .expect("Failed to build MongoDB client")
}

#[tokio::test]
#[ignore] // Run with --ignored when MongoDB is available
async fn test_index_lifecycle() {
    let store = connect().await;
    let collection = "lifecycle";

    let mut spec = IndexSpec::new(
        DATABASE,
        collection,
        "by_user_and_time",
        vec![
            IndexKey::new("user", "asc"),
            IndexKey::new("created_at", "desc"),
        ],
    );
    spec.unique = Some(true);
    spec.collation = Some(Collation::new("en"));

    let name = store
        .create_index(DATABASE, collection, &build_create_request(&spec))
        .await
        .expect("create failed");
    assert_eq!(name, "by_user_and_time");

    let indexes = store.list_indexes(DATABASE, collection).await.expect("list failed");
    let found = indexes
        .iter()
        .find(|index| index.name == name)
        .expect("created index not listed");
    assert_eq!(found.keys, doc! { "user": 1, "created_at": -1 });
    assert_eq!(found.unique, Some(true));

    store
        .drop_index(DATABASE, collection, &name)
        .await
        .expect("drop failed");
    let remaining = store.list_indexes(DATABASE, collection).await.expect("list failed");
    assert!(remaining.iter().all(|index| index.name != name));
}

#[tokio::test]
#[ignore]
async fn test_ttl_index_reports_expiry() {
    let store = connect().await;
    let collection = "ttl";

    let mut spec = IndexSpec::new(DATABASE, collection, "expiry", vec![IndexKey::new("at", "asc")]);
    spec.expire_after_seconds = Some(3600);

    store
        .create_index(DATABASE, collection, &build_create_request(&spec))
        .await
        .expect("create failed");

    let indexes = store.list_indexes(DATABASE, collection).await.expect("list failed");
    let found = indexes
        .iter()
        .find(|index| index.name == "expiry")
        .expect("created index not listed");
    assert_eq!(found.expire_after_seconds, Some(3600));

    store
        .drop_index(DATABASE, collection, "expiry")
        .await
        .expect("drop failed");
}

#[tokio::test]
#[ignore]
async fn test_drop_missing_index_fails() {
    let store = connect().await;
    store
        .create_index(
            DATABASE,
            "missing",
            &build_create_request(&IndexSpec::new(
                DATABASE,
                "missing",
                "present",
                vec![IndexKey::new("a", "asc")],
            )),
        )
        .await
        .expect("create failed");

    assert!(store.drop_index(DATABASE, "missing", "absent").await.is_err());
}
