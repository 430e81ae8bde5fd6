//! School API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use miette::Diagnostic;
use school::api::{self, ApiError, Config};
use school::db::{Database, DbError, SqliteDatabase};
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(school::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(school::binary::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(school::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "school-api")]
#[command(author, version, about = "Teacher registry server", long_about = None)]
struct Cli {
    /// Host address to bind to [default: 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on [default: 3000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path (overrides SCHOOL_DB_PATH; defaults to ~/.local/share/school/school.db)
    #[arg(long)]
    db: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::new();
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(db) = self.db {
            config = config.with_db_path(db);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let config = Cli::parse().into_config();
    api::init_tracing();

    info!("Opening database at {:?}", config.db_path);

    // Ensure parent directory exists
    if let Some(parent) = config.db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&config.db_path).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    api::run(config, db).await?;

    Ok(())
}
