//! Typed error enum for the storage layer.
//!
//! Lets callers match on specific failure modes (not found, duplicate slug,
//! timeout) instead of downcasting opaque boxes.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// Unique constraint violation (slug collision).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL or connection failure reported by the driver.
    #[error("{backend} error: {source}")]
    Database {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    /// No connection could be taken from the pool.
    #[error("connection pool: {0}")]
    Pool(String),

    /// The database stayed locked by another writer for the whole lock budget.
    #[error("database busy: {0}")]
    Busy(String),

    /// The call did not complete within the storage timeout.
    #[error("storage call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// A blocking storage task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// Row data could not be converted into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Pool(_) | Self::Busy(_))
    }

    /// Whether this error is a unique-constraint violation.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    pub(crate) fn animal_not_found(id: i64) -> Self {
        Self::NotFound { entity: "animal", id: id.to_string() }
    }
}

/// Custom `From<sqlx::Error>`, not a blanket `#[from]`.
///
/// - `RowNotFound` → `NotFound` (callers remap with entity context)
/// - SQLSTATE 23505 → `Duplicate`
/// - `PoolTimedOut` → `Pool`
/// - Everything else → `Database`
#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound { entity: "row", id: "unknown".into() },
            sqlx::Error::Database(db_err) if db_err.code().is_some_and(|c| c == "23505") => {
                Self::Duplicate(db_err.message().to_owned())
            },
            sqlx::Error::PoolTimedOut => Self::Pool(err.to_string()),
            _ => Self::Database { backend: "postgres", source: Box::new(err) },
        }
    }
}

#[cfg(feature = "sqlite")]
fn is_unique_violation(code: &rusqlite::ffi::Error, msg: Option<&str>) -> bool {
    code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        || (code.code == rusqlite::ErrorCode::ConstraintViolation
            && msg.is_some_and(|m| m.starts_with("UNIQUE constraint failed")))
}

/// `SQLITE_CONSTRAINT_UNIQUE` and `SQLITE_CONSTRAINT_PRIMARYKEY` → `Duplicate`,
/// `SQLITE_BUSY` and `SQLITE_LOCKED` → `Busy`.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if is_unique_violation(code, msg.as_deref()) =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| "unique constraint failed".to_owned()))
            },
            rusqlite::Error::SqliteFailure(code, _)
                if matches!(
                    code.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::Busy(err.to_string())
            },
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            _ => Self::Database { backend: "sqlite", source: Box::new(err) },
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
