//! SQLite schema migrations, versioned through `PRAGMA user_version`.

use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 1;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1 {
        tracing::info!("Running migration v1: animals table");
        // AUTOINCREMENT keeps ids of deleted rows from being handed out again.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS animals (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                photo_url TEXT NOT NULL,
                common_name TEXT NOT NULL,
                formatted_common_name TEXT NOT NULL,
                scientific_name TEXT NOT NULL,
                habitat TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_animals_slug
                ON animals (formatted_common_name);

            PRAGMA user_version = 1;
            "#,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0)).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
