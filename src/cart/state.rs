//! Cart State Management
//!
//! This module holds the cart state machine and the shared application
//! state that ties carts, catalog, orders, and notifications together.

use super::models::{AddOutcome, CartLine, ProductInput};
use super::persist::CartArchive;
use crate::catalog::Catalog;
use crate::notify::NotificationHub;
use crate::orders::models::Order;
use dashmap::DashMap;
use std::sync::Arc;

// =============================================================================
// Cart
// =============================================================================

/// An ordered sequence of cart lines with de-duplication semantics.
///
/// All operations are synchronous and infallible; expected oddities
/// (duplicate add, removing an absent line) are defined no-ops.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a cart from a previously persisted line list
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Current lines, insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds a product to the cart.
    ///
    /// If a line with the same normalized identifier already exists the
    /// cart is left untouched and [`AddOutcome::Duplicate`] is returned.
    /// A missing identifier is itself a key: two keyless adds collide.
    pub fn add(&mut self, product: ProductInput) -> AddOutcome {
        let key = product.key().map(str::to_owned);
        if self.lines.iter().any(|line| line.id.as_deref() == key.as_deref()) {
            return AddOutcome::Duplicate;
        }
        self.lines.push(product.into_line());
        AddOutcome::Added
    }

    /// Removes the first line matching `product_id`.
    ///
    /// Only a single occurrence is ever removed even if duplicates somehow
    /// exist. Returns whether a line was removed; absence is a no-op.
    pub fn remove(&mut self, product_id: &str) -> bool {
        match self
            .lines
            .iter()
            .position(|line| line.id.as_deref() == Some(product_id))
        {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sets the quantity on every line matching `product_id` (zero or one
    /// under the uniqueness invariant). No clamping; callers clamp.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        for line in self
            .lines
            .iter_mut()
            .filter(|line| line.id.as_deref() == Some(product_id))
        {
            line.quantity = quantity;
        }
    }

    /// Replaces the cart wholesale (client-authoritative sync)
    pub fn replace(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
    }

    /// Empties the cart (successful checkout)
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities; a zero quantity still counts as one item.
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| if line.quantity == 0 { 1 } else { line.quantity })
            .sum()
    }

    /// Sum of `price * quantity` over all lines
    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: carts, their durable archive, the product
/// catalog, submitted orders, and the notification hub.
pub struct AppState {
    /// In-memory storage for carts, keyed by cart id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Cart>,

    /// Durable slot mirror; written after every cart mutation.
    pub archive: CartArchive,

    /// Product document store
    pub catalog: Catalog,

    /// Submitted orders, keyed by order id
    pub orders: DashMap<String, Order>,

    /// Toast notification queue handle
    pub notifications: NotificationHub,
}

impl AppState {
    /// Creates application state with an empty catalog and the archive
    /// rooted at `archive`, restoring any persisted carts.
    pub fn new(archive: CartArchive) -> Self {
        let carts = DashMap::new();
        for (cart_id, cart) in archive.load_all() {
            carts.insert(cart_id, cart);
        }

        Self {
            carts,
            archive,
            catalog: Catalog::new(),
            orders: DashMap::new(),
            notifications: NotificationHub::new(),
        }
    }

    /// Mutates the cart `cart_id` through `op`, then mirrors the result to
    /// the durable slot. The cart is created on first touch.
    pub fn with_cart<T>(&self, cart_id: &str, op: impl FnOnce(&mut Cart) -> T) -> T {
        let mut entry = self.carts.entry(cart_id.to_owned()).or_default();
        let result = op(entry.value_mut());
        self.archive.store(cart_id, entry.value());
        result
    }

    /// Read-only view of the cart `cart_id`; an untouched id reads empty.
    pub fn read_cart<T>(&self, cart_id: &str, read: impl FnOnce(&Cart) -> T) -> T {
        match self.carts.get(cart_id) {
            Some(entry) => read(entry.value()),
            None => read(&Cart::new()),
        }
    }

    /// Drops the cart and its durable slot (successful checkout).
    pub fn discard_cart(&self, cart_id: &str) {
        self.carts.remove(cart_id);
        self.archive.remove(cart_id);
    }
}
