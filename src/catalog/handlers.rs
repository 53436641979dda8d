//! REST API handlers for the product query service

use super::models::ProductQuery;
use crate::cart::state::SharedState;
use crate::error::ApiError;
use axum::extract::{Path, Query, State};
use axum::response::Json as ResponseJson;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:key", get(get_product))
}

/// Endpoint: GET /products
/// Filtered, sorted, paginated product listing.
async fn list_products(
    State(state): State<SharedState>,
    Query(query): Query<ProductQuery>,
) -> impl axum::response::IntoResponse {
    Json(state.catalog.query(&query))
}

/// Endpoint: GET /products/:key
/// Single product by id or slug. Increments the view counter as a side
/// effect; a stale or malformed key is a 404, not a crash.
async fn get_product(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<ResponseJson<Value>, ApiError> {
    let product = state
        .catalog
        .find(&key)
        .ok_or_else(|| ApiError::NotFound(format!("product '{key}'")))?;
    Ok(ResponseJson(json!({ "product": product })))
}
