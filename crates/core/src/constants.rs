//! Shared constants for fauna.
//!
//! Field limits, paging and pool settings used across crates.

/// Number of animals returned per listing page.
pub const PAGE_SIZE: u64 = 5;

/// Photo used when a create request omits `photoUrl`.
pub const DEFAULT_PHOTO_URL: &str = "/public/images/animals-photos/default.jpg";

/// `commonName` length bounds, in characters.
pub const COMMON_NAME_MIN_LEN: usize = 1;
pub const COMMON_NAME_MAX_LEN: usize = 32;

/// `scientificName` length bounds, in characters.
pub const SCIENTIFIC_NAME_MIN_LEN: usize = 1;
pub const SCIENTIFIC_NAME_MAX_LEN: usize = 32;

/// `habitat` length bounds, in characters.
pub const HABITAT_MIN_LEN: usize = 16;
pub const HABITAT_MAX_LEN: usize = 1000;

/// Upper bound on `photoUrl` length.
pub const PHOTO_URL_MAX_LEN: usize = 2048;

/// Default bound on a single storage call, in seconds.
pub const STORAGE_TIMEOUT_SECS: u64 = 10;

/// Default size of the SQLite connection pool.
pub const SQLITE_POOL_SIZE: u32 = 8;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;
