use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product row as persisted in the store.
///
/// `id` is assigned by the store on insert and never changes afterwards;
/// `created_at` and `updated_at` are store-managed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a product; id and timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductProps {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl CreateProductProps {
    pub fn new(name: impl Into<String>, price: Decimal, quantity: i32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }
}

/// Identifier wrapper used for batch lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductId {
    pub id: String,
}

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}
