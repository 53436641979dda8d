//! Catalog Domain Models
//!
//! Product documents plus the filter/sort/pagination parameters the query
//! endpoint accepts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Primary identifier
    pub id: String,

    /// URL-friendly identifier
    pub slug: String,

    pub name: String,
    pub description: String,

    /// Unit price
    pub price: f64,

    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Listing flags
    pub published: bool,
    pub featured: bool,
    pub on_sale: bool,
    pub in_stock: bool,

    /// View counter, incremented on every single-product read
    pub views: u64,

    pub created_at: DateTime<Utc>,
}

/// Sortable product fields
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Price,
    Views,
    #[default]
    #[serde(alias = "createdAt")]
    CreatedAt,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    12
}

/// Filter/sort/pagination parameters of the product listing endpoint.
/// Every filter is optional; absent means "do not filter on this".
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub brand: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub on_sale: Option<bool>,
    pub in_stock: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortOrder,

    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            brand: None,
            published: None,
            featured: None,
            on_sale: None,
            in_stock: None,
            min_price: None,
            max_price: None,
            sort: SortField::default(),
            order: SortOrder::default(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// Pagination metadata accompanying a product page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub total_pages: u64,
    pub total: u64,
    pub page_size: u64,
}

/// One page of products plus its metadata
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}
