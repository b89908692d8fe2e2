//! Storage layer for fauna
//!
//! `SQLite` (default) and `PostgreSQL` backends behind one async trait, with
//! slug uniqueness enforced by a unique index in both.

#[cfg(not(any(feature = "sqlite", feature = "postgres")))]
compile_error!("enable at least one of the `sqlite` or `postgres` features");

mod backend;
pub mod error;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(all(test, feature = "sqlite"))]
mod tests;
pub mod traits;

pub use backend::{StorageBackend, default_timeout};
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;
pub use traits::AnimalStore;
