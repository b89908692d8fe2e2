//! PostgreSQL storage backend using sqlx.

use async_trait::async_trait;
use fauna_core::{
    Animal, NewAnimal, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::pg_migrations::run_pg_migrations;
use crate::traits::AnimalStore;

const ANIMAL_COLUMNS: &str =
    "id, photo_url, common_name, formatted_common_name, scientific_name, habitat";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Convert `u64` to `i64` for SQL LIMIT/OFFSET binds, saturating on overflow.
fn u64_to_i64(val: u64) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

#[async_trait]
impl AnimalStore for PgStorage {
    async fn count(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM animals").fetch_one(&self.pool).await?;
        u64::try_from(count).map_err(|e| StorageError::DataCorruption {
            context: format!("negative row count {count}"),
            source: Box::new(e),
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, StorageError> {
        let animal = sqlx::query_as::<_, Animal>(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE formatted_common_name = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(animal)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Animal>, StorageError> {
        let animal = sqlx::query_as::<_, Animal>(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(animal)
    }

    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<Animal>, StorageError> {
        let animals = sqlx::query_as::<_, Animal>(&format!(
            "SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(u64_to_i64(limit))
        .bind(u64_to_i64(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(animals)
    }

    async fn insert(&self, animal: &NewAnimal) -> Result<Animal, StorageError> {
        let inserted = sqlx::query_as::<_, Animal>(&format!(
            "INSERT INTO animals
                 (photo_url, common_name, formatted_common_name, scientific_name, habitat)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ANIMAL_COLUMNS}"
        ))
        .bind(&animal.photo_url)
        .bind(&animal.common_name)
        .bind(&animal.formatted_common_name)
        .bind(&animal.scientific_name)
        .bind(&animal.habitat)
        .fetch_one(&self.pool)
        .await?;
        tracing::debug!(id = inserted.id, slug = %inserted.formatted_common_name, "inserted animal");
        Ok(inserted)
    }

    async fn update(&self, animal: &Animal) -> Result<Animal, StorageError> {
        sqlx::query_as::<_, Animal>(&format!(
            "UPDATE animals
             SET photo_url = $1, common_name = $2, formatted_common_name = $3,
                 scientific_name = $4, habitat = $5
             WHERE id = $6
             RETURNING {ANIMAL_COLUMNS}"
        ))
        .bind(&animal.photo_url)
        .bind(&animal.common_name)
        .bind(&animal.formatted_common_name)
        .bind(&animal.scientific_name)
        .bind(&animal.habitat)
        .bind(animal.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StorageError::animal_not_found(animal.id))
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
