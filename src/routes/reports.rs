use axum::{routing::get, Router};

use crate::handlers::report::get_low_stock;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/low-stock", get(get_low_stock))
}
