//! HTTP surface for the product catalog.
//!
//! # Responsibility
//! - Wire configuration, storage and routes into a running server.
//! - Keep handler code free of storage bootstrap concerns.
//!
//! # Invariants
//! - The schema is applied before the listener accepts connections.
//! - The storage connection is created here and injected into the router.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::router;
pub use config::ServerConfig;
pub use error::ApiError;
pub use state::AppState;

use catalog_core::{open_db_at, DbError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

pub type ServerResult<T> = Result<T, ServerError>;

/// Startup and serving failures.
#[derive(Debug)]
pub enum ServerError {
    Config(String),
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
            Self::Db(err) => write!(f, "storage bootstrap failed: {err}"),
            Self::Io(err) => write!(f, "server i/o failed: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Opens storage, binds the listener and serves until `shutdown` resolves.
///
/// # Side effects
/// - Creates the database file and `products` table when absent.
/// - Emits `server_start` / `server_stop` logging events.
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> ServerResult<()> {
    let addr = config.socket_addr().map_err(ServerError::Config)?;
    let conn = open_db_at(&config.database)?;
    let app = router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "event=server_start module=http status=ok addr={} database={} in_memory={} version={}",
        listener.local_addr()?,
        config.database,
        config.is_in_memory(),
        catalog_core::core_version()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=http status=error error={err}");
        std::future::pending::<()>().await;
    }
}
