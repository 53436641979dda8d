//! REST API handlers for the notification surface
//!
//! The storefront polls `GET /notifications` (or subscribes to the SSE
//! stream) for the visible toast and reports manual closes through the
//! dismiss endpoint.

use crate::cart::state::SharedState;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;

/// Creates routes for notification operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/notifications", get(get_notifications))
        .route("/notifications/:id/dismiss", post(dismiss_notification))
        .route("/notifications/stream", get(notification_stream))
}

/// Endpoint: GET /notifications
/// Returns the visible toast (at most one) and the queued depth.
async fn get_notifications(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.notifications.snapshot())
}

/// Endpoint: POST /notifications/:id/dismiss
/// Manual close. Dismissing an id that is no longer visible is a quiet
/// no-op, never an error.
async fn dismiss_notification(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let dismissed = state.notifications.dismiss(&id);
    Json(json!({
        "status": if dismissed { "dismissed" } else { "ignored" },
        "id": id,
    }))
}

/// Endpoint: GET /notifications/stream
/// SSE feed of the notification surface, polled once a second.
async fn notification_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = futures_util::stream::unfold(state, |state| async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let view = state.notifications.snapshot();
        let event = Event::default()
            .event("notifications")
            .json_data(&view)
            .unwrap_or_default();
        Some((Ok::<_, Infallible>(event), state))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
