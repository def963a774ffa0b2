//! Record lifecycle scenarios against the in-memory store.
//!
//! Needs no external services; runs with the default test suite.

use product_catalog::InMemoryProductStore;
use product_catalog_integration_tests::scenarios;

#[tokio::test]
async fn test_create_then_find() {
    scenarios::create_then_find(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_find_missing() {
    scenarios::find_missing(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_deserialize_create_serialize() {
    scenarios::deserialize_create_serialize(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_update() {
    scenarios::update(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_update_without_id() {
    scenarios::update_without_id(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_delete() {
    scenarios::delete(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_list_all() {
    scenarios::list_all(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_find_by_name() {
    scenarios::find_by_name(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_find_by_availability() {
    scenarios::find_by_availability(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_find_by_category() {
    scenarios::find_by_category(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_find_by_price() {
    scenarios::find_by_price(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_backend_rejects_invalid_rows() {
    scenarios::backend_rejects_invalid_rows(&InMemoryProductStore::new()).await;
}

#[tokio::test]
async fn test_backend_rejects_oversized_values() {
    scenarios::backend_rejects_oversized_values(&InMemoryProductStore::new()).await;
}

// =============================================================================
// Backend-specific behaviour
// =============================================================================

#[tokio::test]
async fn test_store_shared_as_trait_object() {
    let store = InMemoryProductStore::new();
    let dyn_store: &dyn product_catalog::ProductStore = &store;
    scenarios::list_all(dyn_store).await;
    assert_eq!(store.len().await, 5);
}
