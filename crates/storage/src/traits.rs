//! Storage backend trait abstraction
//!
//! Async domain trait implemented by every backend and by the dispatching
//! [`crate::StorageBackend`].

use async_trait::async_trait;
use fauna_core::{Animal, NewAnimal};

use crate::error::StorageError;

/// Persistence operations on animal records.
///
/// Slug uniqueness is enforced by the store itself; a colliding insert or
/// update fails with [`StorageError::Duplicate`].
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Number of stored animals.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Get animal by `formattedCommonName`.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, StorageError>;

    /// Get animal by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Animal>, StorageError>;

    /// Animals ordered by ascending id, skipping `offset` rows.
    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<Animal>, StorageError>;

    /// Insert a new animal. Returns it with the id assigned by the store.
    async fn insert(&self, animal: &NewAnimal) -> Result<Animal, StorageError>;

    /// Overwrite the stored record with the same id.
    ///
    /// Fails with [`StorageError::NotFound`] when no such id exists.
    async fn update(&self, animal: &Animal) -> Result<Animal, StorageError>;

    /// Delete animal by id. Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;
}
