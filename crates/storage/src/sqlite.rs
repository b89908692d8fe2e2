//! `SQLite` storage implementation.
//!
//! All methods are synchronous; [`crate::sqlite_async`] lifts them onto the
//! tokio blocking pool.

use std::path::Path;
use std::time::Duration;

use fauna_core::{Animal, NewAnimal, SQLITE_POOL_SIZE, fauna_setting};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

const ANIMAL_COLUMNS: &str =
    "id, photo_url, common_name, formatted_common_name, scientific_name, habitat";

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: Pool<SqliteConnectionManager>,
    /// Longest a call waits for a pooled connection or for the write lock.
    lock_wait: Duration,
}

/// Custom connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

fn db_pool_size() -> u32 {
    fauna_setting("DB_POOL_SIZE", SQLITE_POOL_SIZE, 1)
}

/// Lock budget for a storage call bounded by `timeout`.
///
/// Kept at three quarters of the call timeout so that a contended write
/// fails with `SQLITE_BUSY` inside SQLite, before the caller gives up on a
/// blocking task that could still commit.
pub(crate) fn lock_wait_for(timeout: Duration) -> Duration {
    timeout.saturating_sub(timeout / 4)
}

fn map_animal(row: &rusqlite::Row<'_>) -> rusqlite::Result<Animal> {
    Ok(Animal {
        id: row.get(0)?,
        photo_url: row.get(1)?,
        common_name: row.get(2)?,
        formatted_common_name: row.get(3)?,
        scientific_name: row.get(4)?,
        habitat: row.get(5)?,
    })
}

/// Convert `u64` to `i64` for SQL LIMIT/OFFSET binds, saturating on overflow.
pub(crate) fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

impl SqliteStorage {
    /// Create new storage instance with `SQLite` connection pool
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

        let pool_size = db_pool_size();
        let pool = Pool::builder().max_size(pool_size).build(manager)?;
        let storage = Self { pool, lock_wait: lock_wait_for(crate::default_timeout()) };

        let conn = storage.conn()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size = pool_size, path = %db_path.display(), "SqliteStorage initialized");

        Ok(storage)
    }

    pub(crate) fn set_lock_wait(&mut self, lock_wait: Duration) {
        self.lock_wait = lock_wait;
    }

    fn conn(&self) -> Result<PooledConn, StorageError> {
        let conn = self.pool.get_timeout(self.lock_wait)?;
        conn.busy_timeout(self.lock_wait)?;
        Ok(conn)
    }

    pub fn count(&self) -> Result<u64, StorageError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM animals", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|e| StorageError::DataCorruption {
            context: format!("negative row count {count}"),
            source: Box::new(e),
        })
    }

    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, StorageError> {
        let conn = self.conn()?;
        let animal = conn
            .query_row(
                &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE formatted_common_name = ?1"),
                params![slug],
                map_animal,
            )
            .optional()?;
        Ok(animal)
    }

    pub fn find_by_id(&self, id: i64) -> Result<Option<Animal>, StorageError> {
        let conn = self.conn()?;
        let animal = conn
            .query_row(
                &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = ?1"),
                params![id],
                map_animal,
            )
            .optional()?;
        Ok(animal)
    }

    pub fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<Animal>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        ))?;
        let animals = stmt
            .query_map(params![u64_to_i64(limit), u64_to_i64(offset)], map_animal)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(animals)
    }

    pub fn insert(&self, animal: &NewAnimal) -> Result<Animal, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO animals
                 (photo_url, common_name, formatted_common_name, scientific_name, habitat)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                animal.photo_url,
                animal.common_name,
                animal.formatted_common_name,
                animal.scientific_name,
                animal.habitat
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, slug = %animal.formatted_common_name, "inserted animal");
        Ok(animal.clone().with_id(id))
    }

    pub fn update(&self, animal: &Animal) -> Result<Animal, StorageError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE animals
             SET photo_url = ?1, common_name = ?2, formatted_common_name = ?3,
                 scientific_name = ?4, habitat = ?5
             WHERE id = ?6",
            params![
                animal.photo_url,
                animal.common_name,
                animal.formatted_common_name,
                animal.scientific_name,
                animal.habitat,
                animal.id
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::animal_not_found(animal.id));
        }
        Ok(animal.clone())
    }

    pub fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM animals WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
