//! Notification Domain Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a toast notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Purchase,
    Cart,
    Info,
}

/// Display payload attached to a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged, rename_all = "camelCase")]
pub enum NotificationPayload {
    /// Simulated purchase: who bought what
    #[serde(rename_all = "camelCase")]
    Purchase {
        customer: String,
        product_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        product_image: Option<String>,
    },
    /// Cart activity: which product was (not) added
    #[serde(rename_all = "camelCase")]
    Cart {
        #[serde(skip_serializing_if = "Option::is_none")]
        product_id: Option<String>,
        product_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        product_image: Option<String>,
    },
}

/// A transient toast notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Unique per-instance identifier
    pub id: String,

    /// Notification category
    #[serde(rename = "type")]
    pub kind: NotificationKind,

    /// Message shown to the user
    pub message: String,

    /// Optional display payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<NotificationPayload>,

    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    fn new(kind: NotificationKind, message: String, payload: Option<NotificationPayload>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            kind,
            message,
            payload,
            timestamp: Utc::now(),
        }
    }

    /// Cart-activity notification (the `addCartNotification` contract)
    pub fn cart(
        product_name: &str,
        product_id: Option<String>,
        product_image: Option<String>,
        message: String,
    ) -> Self {
        Self::new(
            NotificationKind::Cart,
            message,
            Some(NotificationPayload::Cart {
                product_id,
                product_name: product_name.to_owned(),
                product_image,
            }),
        )
    }

    /// Simulated-purchase notification
    pub fn purchase(customer: &str, product_name: &str, product_image: Option<String>) -> Self {
        Self::new(
            NotificationKind::Purchase,
            format!("{customer} just purchased {product_name}"),
            Some(NotificationPayload::Purchase {
                customer: customer.to_owned(),
                product_name: product_name.to_owned(),
                product_image,
            }),
        )
    }

    /// Plain informational notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message.into(), None)
    }
}
