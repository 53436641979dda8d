//! Notification Hub and Background Driver
//!
//! [`NotificationHub`] is the cheap-to-clone handle every producer goes
//! through: cart handlers report add outcomes, the background ticker
//! injects simulated purchases. It owns the queue behind a mutex and is
//! injected through the application state rather than living as a global.

use super::models::Notification;
use super::queue::{NotificationQueue, QueueConfig};
use crate::catalog::Catalog;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::time::{interval, interval_at};
use tracing::info;

/// Interval between simulated purchase toasts
pub const PURCHASE_INTERVAL: Duration = Duration::from_secs(10 * 60);
/// Queue advancement granularity of the background driver
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Snapshot of the notification surface handed to the HTTP layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NotificationView {
    /// The visible toast, at most one
    pub visible: Vec<Notification>,
    /// Entries still waiting to be shown
    pub pending: usize,
    /// Whether a manual-dismiss cooldown is suppressing promotion
    #[serde(rename = "cooldownActive")]
    pub cooldown_active: bool,
}

/// Shared handle to the notification queue.
#[derive(Clone)]
pub struct NotificationHub {
    queue: Arc<Mutex<NotificationQueue>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            queue: Arc::new(Mutex::new(NotificationQueue::new(config))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NotificationQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a notification to the queue
    pub fn enqueue(&self, note: Notification) {
        self.lock().enqueue(note);
    }

    /// Cart-activity producer: the storefront-wide hook cart call sites
    /// use to report `added` / `duplicate` outcomes.
    pub fn cart_notification(
        &self,
        product_name: &str,
        product_id: Option<String>,
        product_image: Option<String>,
        message: String,
    ) {
        self.enqueue(Notification::cart(
            product_name,
            product_id,
            product_image,
            message,
        ));
    }

    /// Advances the queue to `now`
    pub fn tick(&self, now: Instant) {
        self.lock().tick(now);
    }

    /// Manually dismisses the visible toast, opening the cooldown window
    pub fn dismiss(&self, id: &str) -> bool {
        let now = Instant::now();
        let mut queue = self.lock();
        queue.tick(now);
        queue.dismiss(id, now)
    }

    /// Advances the queue to the present and returns the visible surface
    pub fn snapshot(&self) -> NotificationView {
        let now = Instant::now();
        let mut queue = self.lock();
        queue.tick(now);
        NotificationView {
            visible: queue.visible().cloned().into_iter().collect(),
            pending: queue.pending(),
            cooldown_active: queue.in_cooldown(now),
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background driver
// =============================================================================

const SAMPLE_CUSTOMERS: &[&str] = &[
    "Adewale", "Chinedu", "Fatima", "Ibrahim", "Ngozi", "Samuel", "Amina", "Tunde",
];

/// Background service advancing the queue and emitting simulated purchases.
pub struct NotificationTicker {
    hub: NotificationHub,
    catalog: Catalog,
    purchase_interval: Duration,
}

impl NotificationTicker {
    /// Spawn the notification driver
    pub fn spawn(hub: NotificationHub, catalog: Catalog) -> tokio::task::JoinHandle<()> {
        let service = Self {
            hub,
            catalog,
            purchase_interval: PURCHASE_INTERVAL,
        };
        tokio::spawn(async move {
            service.run().await;
        })
    }

    async fn run(&self) {
        info!(
            "starting notification ticker, purchase interval {:?}",
            self.purchase_interval
        );

        let mut tick = interval(TICK_INTERVAL);
        // The first purchase fires one full interval in, not at startup.
        let mut purchase = interval_at(
            tokio::time::Instant::now() + self.purchase_interval,
            self.purchase_interval,
        );

        loop {
            tokio::select! {
                _ = tick.tick() => self.hub.tick(Instant::now()),
                _ = purchase.tick() => self.simulate_purchase(),
            }
        }
    }

    /// Enqueues a purchase toast for a random catalog product.
    fn simulate_purchase(&self) {
        let mut rng = rand::thread_rng();
        let Some(product) = self.catalog.sample(&mut rng) else {
            return;
        };
        let Some(customer) = SAMPLE_CUSTOMERS.choose(&mut rng).copied() else {
            return;
        };
        self.hub
            .enqueue(Notification::purchase(customer, &product.name, product.image));
    }
}
