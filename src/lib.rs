//! Farmergiant Storefront Core
//!
//! This library provides the core functionality for the Farmergiant
//! agricultural-equipment storefront: cart operations with durable
//! persistence, the toast notification queue, the product query service,
//! and order submission.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod notify;
pub mod orders;

// Infrastructure
pub mod error;
pub mod router;
