//! Orders Domain Module
//!
//! Checkout submission: validation, order storage, and the
//! cart-clearing-on-success contract.

pub mod handlers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Order, OrderInput, OrderResponse};
