//! Unified storage backend with enum dispatch and a bounded call timeout.

#[cfg(feature = "sqlite")]
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use fauna_core::{Animal, NewAnimal, STORAGE_TIMEOUT_SECS, fauna_setting};

use crate::error::StorageError;
use crate::traits::AnimalStore;

/// Routes a trait call to the active backend and bounds it by `timeout`.
macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {{
        let call = async {
            match &$self.backend {
                #[cfg(feature = "sqlite")]
                Backend::Sqlite(s) => <crate::SqliteStorage as AnimalStore>::$method(s, $($arg),*).await,
                #[cfg(feature = "postgres")]
                Backend::Postgres(s) => <crate::PgStorage as AnimalStore>::$method(s, $($arg),*).await,
            }
        };
        match tokio::time::timeout($self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    op = stringify!($method),
                    timeout_secs = $self.timeout.as_secs(),
                    "storage call timed out"
                );
                Err(StorageError::Timeout { secs: $self.timeout.as_secs() })
            },
        }
    }};
}

#[derive(Clone, Debug)]
enum Backend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStorage),
    #[cfg(feature = "postgres")]
    Postgres(crate::PgStorage),
}

/// The store handed to the service layer, built once at startup.
#[derive(Clone, Debug)]
pub struct StorageBackend {
    backend: Backend,
    timeout: Duration,
}

/// Storage timeout from `FAUNA_STORAGE_TIMEOUT_SECS`, at least one second.
pub fn default_timeout() -> Duration {
    Duration::from_secs(fauna_setting("STORAGE_TIMEOUT_SECS", STORAGE_TIMEOUT_SECS, 1))
}

impl Backend {
    /// Keeps backend-side waits inside the call timeout.
    #[cfg_attr(
        not(feature = "sqlite"),
        allow(unused_variables, reason = "postgres bounds waits at pool level")
    )]
    #[allow(irrefutable_let_patterns, reason = "single variant without the postgres feature")]
    fn bound_waits(&mut self, timeout: Duration) {
        #[cfg(feature = "sqlite")]
        if let Self::Sqlite(sqlite) = self {
            sqlite.set_lock_wait(crate::sqlite::lock_wait_for(timeout));
        }
    }
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            backend: Backend::Sqlite(crate::SqliteStorage::new(db_path)?),
            timeout: default_timeout(),
        })
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            backend: Backend::Postgres(crate::PgStorage::new(database_url).await?),
            timeout: default_timeout(),
        })
    }

    /// Replaces the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.backend.bound_waits(timeout);
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match self.backend {
            #[cfg(feature = "sqlite")]
            Backend::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Backend::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl AnimalStore for StorageBackend {
    async fn count(&self) -> Result<u64, StorageError> {
        dispatch!(self, count())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Animal>, StorageError> {
        dispatch!(self, find_by_slug(slug))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Animal>, StorageError> {
        dispatch!(self, find_by_id(id))
    }

    async fn find_all(&self, offset: u64, limit: u64) -> Result<Vec<Animal>, StorageError> {
        dispatch!(self, find_all(offset, limit))
    }

    async fn insert(&self, animal: &NewAnimal) -> Result<Animal, StorageError> {
        dispatch!(self, insert(animal))
    }

    async fn update(&self, animal: &Animal) -> Result<Animal, StorageError> {
        dispatch!(self, update(animal))
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, delete(id))
    }
}
