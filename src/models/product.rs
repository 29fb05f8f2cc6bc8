use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Repository-assigned product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stored inventory item.
///
/// Low-stock status is not a field: it is derived from `quantity` and
/// `reorder_threshold` on every read (see [`crate::alerts`]).
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub reorder_threshold: i64,
}

#[cfg(test)]
impl Product {
    /// The mutable fields of this product, as a draft.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            reorder_threshold: self.reorder_threshold,
        }
    }
}

/// Caller-supplied product data before validation and id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub reorder_threshold: i64,
}

impl ProductDraft {
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            reorder_threshold: self.reorder_threshold,
        }
    }
}

/// A partial update. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub reorder_threshold: Option<i64>,
}

impl ProductPatch {
    /// Merge this patch over `existing`, producing the full candidate that
    /// must be re-validated before it is written.
    pub fn merge_into(self, existing: &Product) -> ProductDraft {
        ProductDraft {
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            description: self.description.or_else(|| existing.description.clone()),
            price: self.price.unwrap_or(existing.price),
            quantity: self.quantity.unwrap_or(existing.quantity),
            reorder_threshold: self.reorder_threshold.unwrap_or(existing.reorder_threshold),
        }
    }
}
