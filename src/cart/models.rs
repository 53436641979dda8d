//! Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart lines
fn default_quantity() -> u32 {
    1
}

/// A single line in a shopping cart.
///
/// Display fields (`name`, `price`, `image`) are snapshots taken when the
/// product was added; they are never re-fetched. Any other fields the
/// client sent along are captured in `extra` so the persisted shape
/// round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Canonical product identifier, normalized at the boundary.
    /// A missing identifier is a degenerate but accepted key.
    pub id: Option<String>,

    /// Name of the product
    pub name: String,

    /// Unit price snapshot
    pub price: f64,

    /// Quantity of this line (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Product image URL snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Captures any extra fields (e.g., brand, category) dynamically
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A product-like payload as submitted by a client when adding to the cart.
///
/// Clients interchangeably send a document-store `_id` or a plain `id`;
/// [`ProductInput::key`] normalizes the pair once, with `_id` winning when
/// both are present.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    /// Document-store identifier
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,

    /// Plain identifier
    pub id: Option<String>,

    /// Name of the product
    pub name: String,

    /// Unit price
    pub price: f64,

    /// Optional quantity; absent means 1
    pub quantity: Option<u32>,

    /// Optional image URL
    pub image: Option<String>,

    /// Any additional fields travel with the line
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ProductInput {
    /// Canonical identifier: `_id` takes precedence over `id`.
    pub fn key(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }

    /// Converts the input into a cart line, applying the quantity default.
    pub fn into_line(self) -> CartLine {
        let id = self.mongo_id.or(self.id);
        CartLine {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity.unwrap_or(1),
            image: self.image,
            extra: self.extra,
        }
    }
}

/// Outcome of an add operation. Never an error: a duplicate add is a
/// defined no-op that only drives a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was appended to the cart
    Added,
    /// The cart already holds this product; nothing changed
    Duplicate,
}

impl AddOutcome {
    /// Wire label used in responses and notifications
    pub fn as_str(&self) -> &'static str {
        match self {
            AddOutcome::Added => "added",
            AddOutcome::Duplicate => "duplicate",
        }
    }
}

// =============================================================================
// Request / Response Shapes
// =============================================================================

/// Input for the add-item endpoint
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    /// The product to add
    #[serde(flatten)]
    pub product: ProductInput,

    /// Optional cart identifier
    #[serde(rename = "cartId")]
    pub cart_id: Option<String>,
}

/// Input for the quantity-update endpoint
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity for the line; callers clamp before sending
    pub quantity: u32,

    /// Optional cart identifier
    #[serde(rename = "cartId")]
    pub cart_id: Option<String>,
}

/// Input for wholesale cart replacement (client-authoritative sync)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCartRequest {
    /// The full line list replacing the current cart
    pub items: Vec<CartLine>,

    /// Optional cart identifier
    pub cart_id: Option<String>,
}

/// Response carrying the cart and its derived totals
#[derive(Debug, Serialize)]
pub struct CartResponse {
    /// Status of the operation (`"ok"`, `"added"`, `"duplicate"`, ...)
    pub status: String,

    /// Cart identifier
    #[serde(rename = "cartId")]
    pub cart_id: String,

    /// Current cart lines, insertion order
    pub items: Vec<CartLine>,

    /// Sum of line quantities
    pub count: u32,

    /// Sum of `price * quantity`
    pub subtotal: f64,
}
