//! SQLite storage bootstrap and schema checks.
//!
//! # Responsibility
//! - Open and configure the catalog SQLite connection.
//! - Apply the static `products` schema before handing the connection out.
//! - Verify that a caller-supplied connection carries that schema.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Products are never read or written before migrations succeed.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_at, open_db_in_memory, MEMORY_DB_PATH};

pub type DbResult<T> = Result<T, DbError>;

/// Name of the single catalog table.
pub const PRODUCTS_TABLE: &str = "products";

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection was opened without running the catalog migrations.
    Uninitialized {
        expected_version: u32,
        actual_version: u32,
    },
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Uninitialized {
                expected_version,
                actual_version,
            } => write!(
                f,
                "database schema version {actual_version} does not match expected {expected_version}; open it with `open_db`"
            ),
            Self::MissingTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Checks that `conn` is at the latest schema version and has `products`.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    let expected_version = migrations::latest_version();
    let actual_version = migrations::current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::Uninitialized {
            expected_version,
            actual_version,
        });
    }

    let exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [PRODUCTS_TABLE],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DbError::MissingTable(PRODUCTS_TABLE));
    }

    Ok(())
}
