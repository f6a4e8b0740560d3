//! Core domain logic for the product catalog.
//! This crate owns the product invariants, the SQLite schema and the
//! use-case service consumed by the HTTP server.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_at, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::product::{
    NewProduct, Product, ProductId, ProductPatch, ProductSummary, ProductValidationError,
    TITLE_MAX_CHARS,
};
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use service::product_service::ProductService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
