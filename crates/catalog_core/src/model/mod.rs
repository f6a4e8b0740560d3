//! Catalog domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core catalog logic.
//! - Keep request-shaped inputs (`NewProduct`, `ProductPatch`) separate from
//!   the persisted record.
//!
//! # Invariants
//! - Every product is identified by a storage-assigned integer `ProductId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod product;
