#![expect(clippy::unwrap_used, reason = "test code")]

use std::time::Duration;

use super::{create_test_animal, create_test_backend};
use crate::error::StorageError;
use crate::traits::AnimalStore;

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_roundtrip_through_trait() {
    let (backend, _temp_dir) = create_test_backend();
    assert_eq!(backend.kind(), "sqlite");

    let fox = backend.insert(&create_test_animal("Red Fox")).await.unwrap();
    assert_eq!(backend.count().await.unwrap(), 1);
    assert_eq!(backend.find_by_slug("red-fox").await.unwrap(), Some(fox.clone()));
    assert_eq!(backend.find_by_id(fox.id).await.unwrap(), Some(fox.clone()));
    assert_eq!(backend.find_all(0, 5).await.unwrap(), vec![fox.clone()]);

    assert!(backend.delete(fox.id).await.unwrap());
    assert_eq!(backend.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_inserts_with_same_slug_admit_one() {
    let (backend, _temp_dir) = create_test_backend();

    let handles: Vec<_> = ["Red Fox", "red fox", "RED-FOX", "Red  Fox!"]
        .into_iter()
        .map(|name| {
            let backend = backend.clone();
            tokio::spawn(async move { backend.insert(&create_test_animal(name)).await })
        })
        .collect();

    let mut inserted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => inserted += 1,
            Err(e) => assert!(e.is_duplicate(), "expected Duplicate, got {e:?}"),
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(backend.count().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_with_timeout_overrides_default() {
    let (backend, _temp_dir) = create_test_backend();
    let backend = backend.with_timeout(Duration::from_secs(3));
    assert_eq!(backend.timeout(), Duration::from_secs(3));
    assert_eq!(backend.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_contended_insert_fails_before_timeout_and_never_commits() {
    let (backend, temp_dir) = create_test_backend();
    let backend = backend.with_timeout(Duration::from_secs(2));

    let writer = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE").unwrap();

    let err = backend.insert(&create_test_animal("Red Fox")).await.unwrap_err();
    assert!(matches!(err, StorageError::Busy(_)), "expected Busy, got {err:?}");

    writer.execute_batch("COMMIT").unwrap();
    drop(writer);

    // The blocking insert has already returned, so nothing can land late.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.count().await.unwrap(), 0);
    assert_eq!(backend.find_by_slug("red-fox").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_insert_succeeds_once_lock_is_released() {
    let (backend, temp_dir) = create_test_backend();
    let backend = backend.with_timeout(Duration::from_secs(4));

    let writer = rusqlite::Connection::open(temp_dir.path().join("test.db")).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE").unwrap();
    let release = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(300));
        writer.execute_batch("COMMIT").unwrap();
    });

    let fox = backend.insert(&create_test_animal("Red Fox")).await.unwrap();
    release.join().unwrap();
    assert_eq!(backend.find_by_id(fox.id).await.unwrap(), Some(fox));
}
