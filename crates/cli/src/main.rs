mod commands;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fauna_core::fauna_var;
use fauna_service::AnimalService;
use fauna_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fauna")]
#[command(about = "Animal catalogue HTTP service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Print the number of stored animals
    Count,
    /// Print one page of animals
    List {
        #[arg(short, long, default_value = "1")]
        page: String,
    },
    /// Print one animal by id
    Get { id: String },
}

pub(crate) fn get_db_path() -> PathBuf {
    if let Some(path) = fauna_var("DB_PATH") {
        return PathBuf::from(path);
    }
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("fauna").join("fauna.db")
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set and the feature is on, SQLite otherwise.
pub(crate) async fn open_backend() -> Result<StorageBackend> {
    #[cfg(feature = "postgres")]
    if let Ok(url) = std::env::var("DATABASE_URL") {
        let backend = StorageBackend::new_postgres(&url).await?;
        tracing::info!(backend = backend.kind(), timeout_secs = backend.timeout().as_secs(), "Storage ready");
        return Ok(backend);
    }

    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let backend = StorageBackend::new_sqlite(&db_path)?;
    tracing::info!(
        backend = backend.kind(),
        path = %db_path.display(),
        timeout_secs = backend.timeout().as_secs(),
        "Storage ready"
    );
    Ok(backend)
}

pub(crate) async fn open_service() -> Result<AnimalService> {
    Ok(AnimalService::new(Arc::new(open_backend().await?)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Count => commands::inspect::run_count().await,
        Commands::List { page } => commands::inspect::run_list(&page).await,
        Commands::Get { id } => commands::inspect::run_get(&id).await,
    }
}
