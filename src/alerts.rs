//! Low-stock evaluation. Pure functions, recomputed on every read.

use crate::models::Product;

/// A product is low on stock when its quantity is at or below its reorder threshold.
pub fn is_low_stock(product: &Product) -> bool {
    product.quantity <= product.reorder_threshold
}

/// Keep only low-stock products, preserving input order.
pub fn filter_low_stock<I>(products: I) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    products.into_iter().filter(is_low_stock).collect()
}

/// Units needed to lift the product back above its threshold (0 when not low).
pub fn units_to_reorder(product: &Product) -> i64 {
    if is_low_stock(product) {
        product.reorder_threshold.saturating_sub(product.quantity).saturating_add(1)
    } else {
        0
    }
}
