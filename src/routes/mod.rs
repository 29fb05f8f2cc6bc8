pub mod products;
pub mod reports;

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::dtos::product::MessageResponse;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(products::routes())
        .merge(reports::routes())
}

/// The full application: routes, middleware and shared state.
pub fn build_app(state: AppState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to StockGuard API - System is running".to_string(),
    })
}

async fn health_check() -> &'static str {
    "OK"
}
