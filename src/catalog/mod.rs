//! Catalog Domain Module
//!
//! The server-side product query service: the product document store plus
//! its filtered/sorted/paginated listing and single-product lookup.

pub mod handlers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Pagination, Product, ProductPage, ProductQuery, SortField, SortOrder};
pub use state::Catalog;
