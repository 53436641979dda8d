//! REST API handlers for cart operations
//!
//! Every mutating endpoint mirrors the resulting cart to its durable slot
//! before responding, and the add endpoint reports its outcome to the
//! notification hub.

use super::{helpers::*, models::*, state::SharedState};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_quantity).delete(remove_item))
        .route("/cart/sync", post(sync_cart))
        .route("/cart/clear", delete(clear_cart))
}

/// Query parameter override for endpoints without a body
#[derive(Debug, Default, Deserialize)]
struct CartIdQuery {
    #[serde(rename = "cartId")]
    cart_id: Option<String>,
}

/// Resolved addressing for one request: which cart, and whether a session
/// cookie still has to be handed out.
struct CartScope {
    cart_id: String,
    session_id: String,
    is_new_session: bool,
}

impl CartScope {
    fn resolve(headers: &HeaderMap, cart_id_override: Option<String>) -> Self {
        let (session_id, is_new_session) = resolve_session_id(headers);
        let cart_id = get_or_default_cart_id(cart_id_override, &session_id);
        Self {
            cart_id,
            session_id,
            is_new_session,
        }
    }

    /// Builds the cart response and attaches the cookie when needed.
    fn respond(&self, state: &SharedState, status: &str) -> Response {
        let body = state.read_cart(&self.cart_id, |cart| CartResponse {
            status: status.to_owned(),
            cart_id: self.cart_id.clone(),
            items: cart.lines().to_vec(),
            count: cart.count(),
            subtotal: cart.subtotal(),
        });

        let mut response = Json(body).into_response();
        attach_session_cookie(&mut response, &self.session_id, self.is_new_session);
        response
    }
}

/// Endpoint: GET /cart
/// Returns the session's cart with its derived totals.
async fn get_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<CartIdQuery>,
) -> impl IntoResponse {
    CartScope::resolve(&headers, query.cart_id).respond(&state, "ok")
}

/// Endpoint: POST /cart/items
/// Adds a product to the cart. A duplicate add leaves the cart untouched
/// and only reports through the notification hub.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemRequest>,
) -> impl IntoResponse {
    let scope = CartScope::resolve(&headers, payload.cart_id);

    let product = payload.product;
    let product_name = product.name.clone();
    let product_key = product.key().map(str::to_owned);
    let product_image = product.image.clone();

    let outcome = state.with_cart(&scope.cart_id, |cart| cart.add(product));

    let message = match outcome {
        AddOutcome::Added => format!("{product_name} added to cart"),
        AddOutcome::Duplicate => format!("{product_name} is already in your cart"),
    };
    state
        .notifications
        .cart_notification(&product_name, product_key, product_image, message);

    scope.respond(&state, outcome.as_str())
}

/// Endpoint: PUT /cart/items/:id
/// Sets the quantity on the matching line. Callers clamp before calling;
/// no validation happens here.
async fn update_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> impl IntoResponse {
    let scope = CartScope::resolve(&headers, payload.cart_id);

    state.with_cart(&scope.cart_id, |cart| {
        cart.set_quantity(&product_id, payload.quantity)
    });

    scope.respond(&state, "updated")
}

/// Endpoint: DELETE /cart/items/:id
/// Removes the first matching line; an absent id is a quiet no-op.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(product_id): Path<String>,
    Query(query): Query<CartIdQuery>,
) -> impl IntoResponse {
    let scope = CartScope::resolve(&headers, query.cart_id);

    let removed = state.with_cart(&scope.cart_id, |cart| cart.remove(&product_id));

    scope.respond(&state, if removed { "removed" } else { "ok" })
}

/// Endpoint: POST /cart/sync
/// Replaces the backend cart to match the client state exactly.
async fn sync_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<SyncCartRequest>,
) -> impl IntoResponse {
    let scope = CartScope::resolve(&headers, payload.cart_id);

    state.with_cart(&scope.cart_id, |cart| cart.replace(payload.items));

    scope.respond(&state, "updated")
}

/// Endpoint: DELETE /cart (alias /cart/clear)
/// Empties the cart wholesale.
async fn clear_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<CartIdQuery>,
) -> impl IntoResponse {
    let scope = CartScope::resolve(&headers, query.cart_id);

    state.with_cart(&scope.cart_id, |cart| cart.clear());

    scope.respond(&state, "cleared")
}
