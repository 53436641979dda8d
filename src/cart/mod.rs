//! Shopping Cart Domain Module
//!
//! This module contains all cart business logic, including:
//! - Domain models (CartLine, inputs, responses)
//! - The cart state machine and shared application state
//! - Durable slot persistence
//! - Session helpers and REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod persist;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use persist::CartArchive;
pub use state::{AppState, Cart, SharedState};
