//! Async trait implementation for `SqliteStorage` via `spawn_blocking`.

use async_trait::async_trait;
use fauna_core::{Animal, NewAnimal};

use crate::SqliteStorage;
use crate::error::StorageError;
use crate::traits::AnimalStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`: `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`: `.to_owned()` a `&str`, pass as `&arg`
/// - `@val arg`: move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl AnimalStore for SqliteStorage {
    async fn count(&self) -> Result<u64, StorageError> {
        delegate!(self, count)
    }
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, StorageError> {
        delegate!(self, find_by_slug, @str slug)
    }
    async fn find_by_id(&self, id: i64) -> Result<Option<Animal>, StorageError> {
        delegate!(self, find_by_id, @val id)
    }
    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<Animal>, StorageError> {
        delegate!(self, find_all, @val offset, @val limit)
    }
    async fn insert(&self, animal: &NewAnimal) -> Result<Animal, StorageError> {
        delegate!(self, insert, @ref animal)
    }
    async fn update(&self, animal: &Animal) -> Result<Animal, StorageError> {
        delegate!(self, update, @ref animal)
    }
    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        delegate!(self, delete, @val id)
    }
}
