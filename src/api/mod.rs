//! HTTP layer: JSON API under `/api/teacher`, server-rendered pages under
//! `/Teacher`, plus health and OpenAPI docs.

mod handlers;
mod pages;
pub mod routes;
mod state;


use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::paths::get_db_path;

pub use handlers::ErrorResponse;
pub use state::AppState;

/// Environment variable overriding the default database path.
pub const DB_PATH_ENV: &str = "SCHOOL_DB_PATH";

/// API server errors.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(school::api::bind),
        help("Is another process already listening on this port? Try --port")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(school::api::serve))]
    Serve(#[source] std::io::Error),
}

/// API server configuration
///
/// Precedence: CLI flag > environment variable > default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            db_path: get_db_path(),
        }
    }
}

impl Config {
    /// Defaults, with `SCHOOL_DB_PATH` applied when set and non-empty.
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(path) = env::var(DB_PATH_ENV)
            && !path.trim().is_empty()
        {
            config.db_path = PathBuf::from(path);
        }
        config
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and database.
///
/// The database is expected to be migrated already.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    let state = AppState::new(db);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("API server listening on http://{}", addr);
    info!("Teacher pages at http://{}/Teacher/List", addr);

    axum::serve(listener, app).await.map_err(ApiError::Serve)?;
    Ok(())
}
