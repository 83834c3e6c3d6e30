mod common;

use common::create_test_profile;

use tm_core::{ProfileUpdate, Role};
use tm_store::{MemoryProfileStore, ProfileStore, StoreError};

use googletest::prelude::*;

#[tokio::test]
async fn given_empty_store_when_read_then_none() {
    let store = MemoryProfileStore::new();

    let result = store.read("u1").await.unwrap();

    assert_that!(result, none());
}

#[tokio::test]
async fn given_created_profile_when_read_then_found_and_cached() {
    let store = MemoryProfileStore::new();
    let profile = create_test_profile("u1", Role::User);

    store.create("u1", &profile).await.unwrap();

    assert_that!(store.read("u1").await.unwrap(), some(eq(&profile)));
    assert_that!(store.read_from_cache("u1").await.unwrap(), some(eq(&profile)));
    assert_that!(store.create_calls(), eq(1));
}

#[tokio::test]
async fn given_seeded_document_when_read_then_cache_populated() {
    let store = MemoryProfileStore::new();
    let profile = create_test_profile("u1", Role::Admin);
    store.insert(profile.clone());
    assert_that!(store.cached("u1"), none());

    store.read("u1").await.unwrap();

    assert_that!(store.cached("u1"), some(eq(&profile)));
}

#[tokio::test]
async fn given_unreachable_store_when_read_then_transient_error() {
    let store = MemoryProfileStore::new();
    store.set_reachable(false);

    let result = store.read("u1").await;

    let error = result.unwrap_err();
    assert!(matches!(error, StoreError::Unavailable { .. }));
    assert!(error.is_transient());
}

#[tokio::test]
async fn given_unreachable_store_when_create_then_error_but_call_counted() {
    let store = MemoryProfileStore::new();
    store.set_reachable(false);
    let profile = create_test_profile("u1", Role::User);

    let result = store.create("u1", &profile).await;

    assert_that!(result, err(anything()));
    assert_that!(store.create_calls(), eq(1));
    assert_that!(store.document("u1"), none());
}

#[tokio::test]
async fn given_unreachable_store_when_read_from_cache_then_cached_copy_served() {
    let store = MemoryProfileStore::new();
    let profile = create_test_profile("u1", Role::User);
    store.insert_cached(profile.clone());
    store.set_reachable(false);

    let result = store.read_from_cache("u1").await.unwrap();

    assert_that!(result, some(eq(&profile)));
}

#[tokio::test]
async fn given_failing_cache_when_read_from_cache_then_error() {
    let store = MemoryProfileStore::new();
    store.set_cache_failing(true);

    let result = store.read_from_cache("u1").await;

    assert!(matches!(result, Err(StoreError::CacheRead { .. })));
}

#[tokio::test]
async fn given_existing_document_when_updated_then_fields_merged() {
    let store = MemoryProfileStore::new();
    let profile = create_test_profile("u1", Role::User);
    store.insert(profile.clone());

    store
        .update("u1", &ProfileUpdate::role(Role::Admin).touched())
        .await
        .unwrap();

    let stored = store.document("u1").unwrap();
    assert_that!(stored.role, eq(Role::Admin));
    assert_that!(stored.created_at, eq(profile.created_at));
    assert_that!(store.update_calls(), eq(1));
}

#[tokio::test]
async fn given_missing_document_when_updated_then_not_found() {
    let store = MemoryProfileStore::new();

    let result = store.update("ghost", &ProfileUpdate::role(Role::Admin)).await;

    let error = result.unwrap_err();
    assert!(matches!(error, StoreError::NotFound { .. }));
    assert!(!error.is_transient());
}
