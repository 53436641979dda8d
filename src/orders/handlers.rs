//! REST API handler for order submission
//!
//! A successful submission stores the order, logs a checkout summary, and
//! clears the session's cart together with its durable slot; the client
//! relies on that contract to start the next visit empty.

use super::models::{Order, OrderInput, OrderResponse};
use crate::cart::helpers::{format_item_summary, get_or_default_cart_id, resolve_session_id};
use crate::cart::state::SharedState;
use crate::error::ApiError;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Json as ResponseJson;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Creates routes for order operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/orders", post(submit_order))
}

/// Endpoint: POST /orders
/// Validates the checkout form, stores the order, clears the cart.
async fn submit_order(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<OrderInput>,
) -> Result<ResponseJson<OrderResponse>, ApiError> {
    validate(&payload)?;

    let (session_id, _) = resolve_session_id(&headers);
    let cart_id = get_or_default_cart_id(payload.cart_id.clone(), &session_id);

    let order = Order {
        id: Uuid::new_v4().simple().to_string(),
        status: "created".to_owned(),
        customer: payload.customer,
        payment_method: payload.payment_method,
        items: payload.items,
        subtotal: payload.subtotal,
        shipping: payload.shipping,
        total: payload.total,
        created_at: Utc::now(),
    };

    tracing::info!(
        "checkout: order {} for cart {} - {}",
        order.id,
        cart_id,
        format_item_summary(&order.items)
    );

    let order_id = order.id.clone();
    state.orders.insert(order_id.clone(), order);
    state.discard_cart(&cart_id);

    Ok(ResponseJson(OrderResponse {
        status: "created".to_owned(),
        order_id,
    }))
}

/// Field-level validation mirroring what the checkout form enforces
/// inline. Failures come back as a per-field message map, never a crash.
fn validate(input: &OrderInput) -> Result<(), ApiError> {
    let mut fields = BTreeMap::new();

    let required = [
        ("customer.name", &input.customer.name),
        ("customer.email", &input.customer.email),
        ("customer.phone", &input.customer.phone),
        ("customer.address", &input.customer.address),
        ("customer.city", &input.customer.city),
        ("paymentMethod", &input.payment_method),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            fields.insert(field.to_owned(), "is required".to_owned());
        }
    }

    if !input.customer.email.trim().is_empty() && !input.customer.email.contains('@') {
        fields.insert("customer.email".to_owned(), "is not a valid email".to_owned());
    }

    if input.items.is_empty() {
        fields.insert("items".to_owned(), "cart is empty".to_owned());
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(fields))
    }
}
