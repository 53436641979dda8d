//! Order Domain Models

use crate::cart::models::CartLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact and delivery details captured at checkout
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Checkout submission: contact/delivery/payment fields plus the client's
/// snapshot of the cart and its computed totals.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer: CustomerInfo,

    #[serde(default)]
    pub payment_method: String,

    /// Cart to clear on success; falls back to the session cart
    pub cart_id: Option<String>,

    /// Snapshot of the cart lines at submission time
    #[serde(default)]
    pub items: Vec<CartLine>,

    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default)]
    pub total: f64,
}

/// A stored order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub status: String,
    pub customer: CustomerInfo,
    pub payment_method: String,
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Response for a successful submission
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub status: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
}
