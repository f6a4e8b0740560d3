//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the product data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must pass `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod product_repo;
