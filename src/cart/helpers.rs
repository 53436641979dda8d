//! Cart Session Helpers
//!
//! Cookie-based session resolution and small formatting utilities shared
//! by the cart and order handlers.

use super::models::CartLine;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderMap;
use axum::response::Response;
use uuid::Uuid;

/// Name of the session cookie carrying the cart id
pub const SESSION_COOKIE: &str = "cart_session";

/// Resolves the session id from the `cart_session` cookie, minting a fresh
/// uuid when absent. Returns `(session_id, is_new_session)`.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_owned())
        })
        .next();

    match existing {
        Some(session_id) => (session_id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Returns the explicit `cartId` when the client sent one, otherwise the
/// cookie session id. There is exactly one cart per browsing session.
pub fn get_or_default_cart_id(cart_id: Option<String>, session_id: &str) -> String {
    cart_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| session_id.to_owned())
}

/// Attaches the session cookie to a response for newly minted sessions.
pub fn attach_session_cookie(response: &mut Response, session_id: &str, is_new_session: bool) {
    if !is_new_session {
        return;
    }
    let cookie_val = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
    match cookie_val.parse() {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(err) => tracing::warn!("session cookie not attached: {err}"),
    }
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Feeder, 1x Drinker"`.
pub fn format_item_summary(items: &[CartLine]) -> String {
    items
        .iter()
        .map(|line| format!("{}x {}", line.quantity, line.name))
        .collect::<Vec<_>>()
        .join(", ")
}
