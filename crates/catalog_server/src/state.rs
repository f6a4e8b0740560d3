//! Shared router state.
//!
//! # Responsibility
//! - Own the single storage connection handed in at startup.
//! - Run each service call on the blocking pool under the connection lock.
//!
//! # Invariants
//! - The lock is held for exactly one service call.
//! - No other mutable state is shared between requests.

use crate::error::ApiError;
use catalog_core::{ProductService, RepoResult, SqliteProductRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection returned by `catalog_core::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` against a product service bound to the shared connection.
    pub async fn with_service<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&ProductService<SqliteProductRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| ApiError::Internal("storage connection lock poisoned".to_string()))?;
            let service = ProductService::new(SqliteProductRepository::new(&conn));
            op(&service).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("storage task failed: {err}")))?
    }
}
