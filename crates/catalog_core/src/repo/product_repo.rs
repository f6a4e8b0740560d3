//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `products` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations.
//! - Update/delete report `NotFound` when no row matched.
//! - Reads return rows as stored; field rules apply to writes only, so list
//!   and detail agree on rows written without them.
//! - Ids come from `AUTOINCREMENT` and are never reused after deletion.

use crate::db::{verify_schema, DbError};
use crate::model::product::{NewProduct, Product, ProductId, ProductSummary, ProductValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProductValidationError),
    Db(DbError),
    NotFound(ProductId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ProductValidationError> for RepoError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for product CRUD operations.
pub trait ProductRepository {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId>;
    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>>;
    fn list_products(&self) -> RepoResult<Vec<ProductSummary>>;
    fn update_product(&self, product: &Product) -> RepoResult<()>;
    fn delete_product(&self, id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after checking that the catalog schema is present.
    ///
    /// # Errors
    /// - `RepoError::Db(DbError::Uninitialized { .. })` for a connection that
    ///   never went through migrations.
    /// - `RepoError::Db(DbError::MissingTable(_))` when `products` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        verify_schema(conn)?;
        Ok(Self::new(conn))
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        product.validate()?;

        self.conn.execute(
            "INSERT INTO products (title, description, price) VALUES (?1, ?2, ?3);",
            params![
                product.title.as_str(),
                product.description.as_deref(),
                product.price,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_product(&self, id: ProductId) -> RepoResult<Option<Product>> {
        let product = self
            .conn
            .query_row(
                "SELECT id, title, description, price FROM products WHERE id = ?1;",
                [id],
                parse_product_row,
            )
            .optional()?;

        Ok(product)
    }

    fn list_products(&self) -> RepoResult<Vec<ProductSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, price FROM products ORDER BY id ASC;")?;
        let rows = stmt.query_map([], |row| {
            Ok(ProductSummary {
                id: row.get("id")?,
                title: row.get("title")?,
                price: row.get("price")?,
            })
        })?;

        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }
        Ok(products)
    }

    fn update_product(&self, product: &Product) -> RepoResult<()> {
        product.validate()?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                title = ?1,
                description = ?2,
                price = ?3
             WHERE id = ?4;",
            params![
                product.title.as_str(),
                product.description.as_deref(),
                product.price,
                product.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(product.id));
        }

        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_product_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        price: row.get("price")?,
    })
}
