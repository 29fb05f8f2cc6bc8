// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alerts;
use crate::models::{Product, ProductId};
use crate::validation::UncheckedProduct;

/// Body of POST, PUT and PATCH on products.
///
/// Fields stay untyped here so that a missing or mistyped field is reported
/// by the validator alongside every other violation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub reorder_threshold: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub reorder_threshold: i64,
    pub low_stock: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub reorder_threshold: i64,
    pub units_to_reorder: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<ProductRequest> for UncheckedProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
            reorder_threshold: req.reorder_threshold,
        }
    }
}

// Convert from Model to Response DTO, deriving alert state at read time
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let low_stock = alerts::is_low_stock(&product);
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            reorder_threshold: product.reorder_threshold,
            low_stock,
        }
    }
}

impl From<Product> for LowStockItem {
    fn from(product: Product) -> Self {
        let units_to_reorder = alerts::units_to_reorder(&product);
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            reorder_threshold: product.reorder_threshold,
            units_to_reorder,
        }
    }
}
