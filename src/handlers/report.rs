use axum::{extract::State, Json};
use tracing::instrument;

use crate::dtos::product::LowStockItem;
use crate::error::AppError;
use crate::state::AppState;

// GET /reports/low-stock - Products at or below their reorder threshold
#[instrument(skip(state))]
pub async fn get_low_stock(State(state): State<AppState>) -> Result<Json<Vec<LowStockItem>>, AppError> {
    let products = state.inventory.list_low_stock().await?;
    Ok(Json(products.into_iter().map(LowStockItem::from).collect()))
}
