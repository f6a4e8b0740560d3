//! Product domain model.
//!
//! # Responsibility
//! - Define the persisted catalog record and its read projections.
//! - Define typed create/update inputs decoded from request bodies.
//! - Validate field constraints before any storage write.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - `title` is non-empty and at most `TITLE_MAX_CHARS` characters.
//! - `price` is a finite number.
//!
//! # See also
//! - crates/catalog_core/src/db/migrations/0001_products.sql

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// Maximum title length in characters, mirrored by `VARCHAR(100)` in DDL.
pub const TITLE_MAX_CHARS: usize = 100;

/// Field-level validation failure for product writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductValidationError {
    /// Title is the empty string.
    EmptyTitle,
    /// Title exceeds the column width.
    TitleTooLong { len: usize, max: usize },
    /// Price is NaN or infinite.
    NonFinitePrice(f64),
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title cannot be empty"),
            Self::TitleTooLong { len, max } => {
                write!(f, "title is {len} characters long; at most {max} allowed")
            }
            Self::NonFinitePrice(value) => write!(f, "price must be a finite number, got {value}"),
        }
    }
}

impl Error for ProductValidationError {}

/// Full persisted product record, as returned by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Free-form text; `None` is serialized as `null`.
    pub description: Option<String>,
    pub price: f64,
}

impl Product {
    /// Checks field constraints shared by create and update paths.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(&self.title, self.price)
    }

    /// Overwrites only the fields present in `patch`.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Product(title='{}', price={})", self.title, self.price)
    }
}

/// List projection. Description is deliberately absent from list output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
}

/// Creation input. `title` and `price` are required; `description` may be
/// omitted or `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl NewProduct {
    pub fn new(title: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            description,
            price,
        }
    }

    pub fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(&self.title, self.price)
    }
}

/// Partial update input.
///
/// Absent keys keep the stored value. `title` and `price` reject explicit
/// `null` because their columns are non-nullable; `description: null`
/// clears the stored description (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_non_null")]
    pub price: Option<f64>,
}

fn validate_fields(title: &str, price: f64) -> Result<(), ProductValidationError> {
    if title.is_empty() {
        return Err(ProductValidationError::EmptyTitle);
    }

    let len = title.chars().count();
    if len > TITLE_MAX_CHARS {
        return Err(ProductValidationError::TitleTooLong {
            len,
            max: TITLE_MAX_CHARS,
        });
    }

    if !price.is_finite() {
        return Err(ProductValidationError::NonFinitePrice(price));
    }

    Ok(())
}

fn deserialize_non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(serde::de::Error::custom("field cannot be null")),
    }
}

fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
