//! Notification Domain Module
//!
//! This module contains the toast notification subsystem, including:
//! - Domain models (Notification, kinds, payloads)
//! - The queue state machine (timed promotion, cooldown)
//! - The shared hub handle and its background driver
//! - REST + SSE handlers

pub mod handlers;
pub mod hub;
pub mod models;
pub mod queue;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use hub::{NotificationHub, NotificationTicker, NotificationView};
pub use models::{Notification, NotificationKind, NotificationPayload};
pub use queue::{NotificationQueue, QueueConfig};
