//! PostgreSQL schema migrations for fauna storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS animals (
            id BIGSERIAL PRIMARY KEY,
            photo_url TEXT NOT NULL,
            common_name TEXT NOT NULL,
            formatted_common_name TEXT NOT NULL,
            scientific_name TEXT NOT NULL,
            habitat TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_animals_slug ON animals (formatted_common_name)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
