//! Product use-case service.
//!
//! # Responsibility
//! - Provide the five catalog entry points used by the HTTP layer.
//! - Turn absent rows into `RepoError::NotFound` for detail/update/delete.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Update keeps every field the patch does not carry.
//! - Service layer remains storage-agnostic.

use crate::model::product::{NewProduct, Product, ProductId, ProductPatch, ProductSummary};
use crate::repo::product_repo::{ProductRepository, RepoError, RepoResult};
use log::debug;

/// Use-case service wrapper for product CRUD operations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every product as a summary (no description).
    pub fn list_products(&self) -> RepoResult<Vec<ProductSummary>> {
        self.repo.list_products()
    }

    /// Gets one product by id.
    ///
    /// Returns `RepoError::NotFound` when the id is absent.
    pub fn get_product(&self, id: ProductId) -> RepoResult<Product> {
        self.repo.get_product(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Validates and inserts a new product, returning its assigned id.
    pub fn create_product(&self, product: &NewProduct) -> RepoResult<ProductId> {
        let id = self.repo.create_product(product)?;
        debug!("event=product_create module=service status=ok id={id}");
        Ok(id)
    }

    /// Applies a partial update to an existing product.
    ///
    /// # Contract
    /// - Fetches the current record first; absent id is `NotFound`.
    /// - Fields missing from `patch` keep their stored value.
    /// - Returns the record as persisted.
    pub fn update_product(&self, id: ProductId, patch: &ProductPatch) -> RepoResult<Product> {
        let mut product = self.get_product(id)?;
        product.apply(patch);
        self.repo.update_product(&product)?;
        debug!("event=product_update module=service status=ok id={id} product={product}");
        Ok(product)
    }

    /// Hard-deletes an existing product.
    pub fn delete_product(&self, id: ProductId) -> RepoResult<()> {
        let product = self.get_product(id)?;
        self.repo.delete_product(product.id)?;
        debug!("event=product_delete module=service status=ok id={id}");
        Ok(())
    }
}
