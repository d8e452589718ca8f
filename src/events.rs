//! Domain events and the channel plumbing that carries them.
//!
//! Services publish events with [`EventSender::send_or_log`]; the demo
//! binary runs [`process_events`] to log them and surface user-facing
//! notifications. The channel is the only asynchronous seam in the
//! crate — the services themselves stay synchronous and pure.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{NotificationKind, OrderStatus};
use crate::services::notifications::NotificationService;

/// The events the engine can emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Cart events
    CartItemAdded { product_id: Uuid, quantity: u32 },
    CartItemRemoved { product_id: Uuid },

    // Order events
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: OrderStatus,
        new_status: OrderStatus,
    },
    OrderCancelled { order_id: Uuid, reason: String },
    OrderDelivered(Uuid),

    // Payment events
    PaymentCaptured(Uuid),
    PaymentPending(Uuid),
    PaymentDeclined(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Creates a sender/receiver pair with a bounded channel.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of propagating on failure. Event
    /// delivery is best-effort; domain state never depends on it.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(err) = self.send(event).await {
            warn!("Dropping event: {}", err);
        }
    }
}

/// Consumes events: logs each one and pushes user-facing notifications
/// onto the in-memory notification list.
pub async fn process_events(mut rx: mpsc::Receiver<Event>, notifications: Arc<NotificationService>) {
    while let Some(event) = rx.recv().await {
        info!(?event, "event received");
        match &event {
            Event::OrderCreated(order_id) => {
                notifications.push(
                    NotificationKind::Success,
                    "Order placed",
                    format!("Order {} has been placed", order_id),
                );
            }
            Event::OrderStatusChanged {
                order_id,
                new_status,
                ..
            } => {
                notifications.push(
                    NotificationKind::Info,
                    "Delivery update",
                    format!("Order {} is now {}", order_id, new_status),
                );
            }
            Event::OrderDelivered(order_id) => {
                notifications.push(
                    NotificationKind::Success,
                    "Delivered",
                    format!("Order {} was delivered", order_id),
                );
            }
            Event::OrderCancelled { order_id, reason } => {
                notifications.push(
                    NotificationKind::Warning,
                    "Order cancelled",
                    format!("Order {} cancelled: {}", order_id, reason),
                );
            }
            Event::PaymentDeclined(order_id) => {
                notifications.push(
                    NotificationKind::Warning,
                    "Payment declined",
                    format!("Payment for order {} was declined", order_id),
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (sender, rx) = EventSender::channel(1);
        drop(rx);
        // Must not panic or error out
        sender.send_or_log(Event::OrderCreated(Uuid::new_v4())).await;
    }

    #[tokio::test]
    async fn order_events_become_notifications() {
        let (sender, rx) = EventSender::channel(16);
        let notifications = Arc::new(NotificationService::new());
        let worker = tokio::spawn(process_events(rx, notifications.clone()));

        let order_id = Uuid::new_v4();
        sender.send(Event::OrderCreated(order_id)).await.unwrap();
        sender
            .send(Event::OrderStatusChanged {
                order_id,
                old_status: OrderStatus::Ordered,
                new_status: OrderStatus::Packed,
            })
            .await
            .unwrap();
        drop(sender);
        worker.await.unwrap();

        let list = notifications.list();
        assert_eq!(list.len(), 2);
        assert!(list.iter().any(|n| n.title == "Order placed"));
        assert!(list.iter().any(|n| n.message.contains("packed")));
    }
}
