// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::dtos::product::{MessageResponse, ProductRequest, ProductResponse};
use crate::error::AppError;
use crate::models::ProductId;
use crate::state::AppState;
use crate::validation::ProductValidator;

type IdPath = Result<Path<ProductId>, PathRejection>;
type ProductBody = Result<Json<ProductRequest>, JsonRejection>;

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.inventory.list_products().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    id: IdPath,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    let product = state.inventory.get_product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: ProductBody,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(payload) = payload?;
    let draft = ProductValidator::new().check_draft(payload.into())?;
    let product = state.inventory.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/{id} - Replace product
#[instrument(skip(state, payload))]
pub async fn replace_product(
    id: IdPath,
    State(state): State<AppState>,
    payload: ProductBody,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let draft = ProductValidator::new().check_draft(payload.into())?;
    let product = state.inventory.replace_product(id, draft).await?;
    Ok(Json(ProductResponse::from(product)))
}

// PATCH /products/{id} - Update supplied fields only
#[instrument(skip(state, payload))]
pub async fn update_product(
    id: IdPath,
    State(state): State<AppState>,
    payload: ProductBody,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let patch = ProductValidator::new().check_patch(payload.into())?;
    let product = state.inventory.update_product(id, patch).await?;
    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    id: IdPath,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    state.inventory.delete_product(id).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
