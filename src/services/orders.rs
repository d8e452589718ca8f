//! Order lifecycle: checkout snapshotting, the linear delivery state
//! machine, and the orthogonal payment axis.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::ids::IdProvider;
use crate::models::{
    CartLine, LocationEntry, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Waypoint,
};
use crate::services::cart;

/// Checkout parameters validated at the boundary. Validation failures
/// surface as user-facing messages, never as crashes.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutInput {
    #[validate(custom = "validate_not_blank")]
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    /// One-time password for prepaid methods; must be exactly 6 digits
    /// when present.
    #[validate(custom = "validate_otp")]
    pub otp: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_otp(otp: &str) -> Result<(), ValidationError> {
    if otp.len() != 6 || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("otp_must_be_six_digits"));
    }
    Ok(())
}

/// Builds the fixed three-stop route: warehouse → mandi → customer.
/// Coordinates are synthetic; there is no real geolocation.
fn build_route(delivery_address: &str) -> Vec<Waypoint> {
    vec![
        Waypoint {
            label: "GreenLedger Central Warehouse, Coimbatore".to_string(),
            latitude: 11.0168,
            longitude: 76.9558,
        },
        Waypoint {
            label: "Uzhavan Santhai Mandi, Erode".to_string(),
            latitude: 11.3410,
            longitude: 77.7172,
        },
        Waypoint {
            label: delivery_address.to_string(),
            latitude: 11.1085,
            longitude: 77.3411,
        },
    ]
}

/// Pure transition: the next state of `order` under `advance`.
///
/// Terminal states (`Delivered`, `Cancelled`, `PaymentFailed`) absorb
/// the call — the returned order is an unchanged clone, not an error,
/// so repeated timer ticks after delivery are harmless.
pub fn advanced(order: &Order) -> Order {
    let Some(next_status) = order.status.successor() else {
        return order.clone();
    };
    let mut next = order.clone();
    next.status = next_status;
    let waypoint = &next.route[next_status.waypoint_index()];
    next.current_location = waypoint.label.clone();
    next.updated_at = Utc::now();
    next.location_history.push(LocationEntry {
        status: next_status,
        location: next.current_location.clone(),
        timestamp: next.updated_at,
    });
    next
}

/// Order management over the in-memory order store.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<DashMap<Uuid, Order>>,
    ids: Arc<dyn IdProvider>,
    event_sender: EventSender,
}

impl OrderService {
    pub fn new(
        orders: Arc<DashMap<Uuid, Order>>,
        ids: Arc<dyn IdProvider>,
        event_sender: EventSender,
    ) -> Self {
        Self {
            orders,
            ids,
            event_sender,
        }
    }

    /// Creates an order from the current cart snapshot.
    ///
    /// Fails only on caller-side precondition violations: an empty
    /// cart, a blank delivery address, or a malformed OTP.
    #[instrument(skip(self, lines, input), fields(items = lines.len()))]
    pub async fn create_order(
        &self,
        lines: &[CartLine],
        input: CheckoutInput,
    ) -> Result<Order, ServiceError> {
        input.validate()?;
        if lines.is_empty() {
            return Err(ServiceError::ValidationError(
                "Cannot checkout an empty cart".to_string(),
            ));
        }

        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total(),
                carbon_per_unit: line.carbon_per_unit,
            })
            .collect();

        let route = build_route(&input.delivery_address);
        let now = Utc::now();
        let current_location = route[0].label.clone();
        let payment_status = match input.payment_method {
            PaymentMethod::CashOnDelivery => PaymentStatus::Pending,
            PaymentMethod::Upi | PaymentMethod::Card => PaymentStatus::Paid,
        };

        let order = Order {
            id: self.ids.order_id(),
            order_number: self.ids.order_number(),
            tracking_id: self.ids.tracking_id(),
            blockchain_tx: self.ids.blockchain_tx(),
            total: cart::total_amount(lines),
            items,
            payment_method: input.payment_method,
            payment_status,
            delivery_address: input.delivery_address,
            status: OrderStatus::Ordered,
            current_location: current_location.clone(),
            route,
            location_history: vec![LocationEntry {
                status: OrderStatus::Ordered,
                location: current_location,
                timestamp: now,
            }],
            created_at: now,
            updated_at: now,
            cancel_reason: None,
        };
        debug_assert!(order.total_is_consistent());

        self.orders.insert(order.id, order.clone());
        self.event_sender.send_or_log(Event::OrderCreated(order.id)).await;
        if order.payment_status == PaymentStatus::Paid {
            self.event_sender
                .send_or_log(Event::PaymentCaptured(order.id))
                .await;
        }
        info!(order_number = %order.order_number, total = %order.total, "order created");
        Ok(order)
    }

    pub fn get(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        self.orders
            .get(&order_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    pub fn list(&self) -> Vec<Order> {
        let mut all: Vec<Order> = self.orders.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Advances the order one step along the delivery path, moving its
    /// current location to the matching route waypoint. Idempotent on
    /// terminal states.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn advance(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        let order = self.get(order_id)?;
        let old_status = order.status;
        let next = advanced(&order);
        if next.status == old_status {
            return Ok(next);
        }

        self.orders.insert(next.id, next.clone());
        self.event_sender
            .send_or_log(Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status: next.status,
            })
            .await;
        if next.status == OrderStatus::Delivered {
            self.event_sender
                .send_or_log(Event::OrderDelivered(order_id))
                .await;
        }
        info!(from = %old_status, to = %next.status, "order advanced");
        Ok(next)
    }

    /// Cancels a not-yet-delivered order.
    #[instrument(skip(self, reason), fields(order_id = %order_id))]
    pub async fn cancel(
        &self,
        order_id: Uuid,
        reason: impl Into<String>,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get(order_id)?;
        if order.status == OrderStatus::Delivered {
            return Err(ServiceError::InvalidOperation(
                "Cannot cancel a delivered order".to_string(),
            ));
        }
        if order.status.is_terminal() {
            // Cancelling an already-failed or cancelled order is a no-op
            return Ok(order);
        }
        let reason = reason.into();
        order.status = OrderStatus::Cancelled;
        order.cancel_reason = Some(reason.clone());
        order.updated_at = Utc::now();
        self.orders.insert(order.id, order.clone());
        self.event_sender
            .send_or_log(Event::OrderCancelled { order_id, reason })
            .await;
        Ok(order)
    }

    /// Marks the payment captured. Independent of delivery status.
    pub async fn mark_paid(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        let order = self.set_payment_status(order_id, PaymentStatus::Paid)?;
        self.event_sender
            .send_or_log(Event::PaymentCaptured(order_id))
            .await;
        Ok(order)
    }

    /// Marks the payment pending (e.g. cash on delivery).
    pub async fn mark_pending(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        let order = self.set_payment_status(order_id, PaymentStatus::Pending)?;
        self.event_sender
            .send_or_log(Event::PaymentPending(order_id))
            .await;
        Ok(order)
    }

    /// Declines the payment. Only reachable from `Ordered`; the order
    /// moves to the terminal `PaymentFailed` state. The demo flow never
    /// takes this path, but the state machine keeps it honest.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn decline_payment(&self, order_id: Uuid) -> Result<Order, ServiceError> {
        let mut order = self.get(order_id)?;
        if order.status != OrderStatus::Ordered {
            return Err(ServiceError::InvalidOperation(format!(
                "Cannot decline payment for an order in status {}",
                order.status
            )));
        }
        order.status = OrderStatus::PaymentFailed;
        order.payment_status = PaymentStatus::Declined;
        order.updated_at = Utc::now();
        self.orders.insert(order.id, order.clone());
        self.event_sender
            .send_or_log(Event::PaymentDeclined(order_id))
            .await;
        Ok(order)
    }

    fn set_payment_status(
        &self,
        order_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Order, ServiceError> {
        let mut order = self.get(order_id)?;
        order.payment_status = status;
        order.updated_at = Utc::now();
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }
}
