use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enum representing the possible delivery statuses of an order.
///
/// The happy path is strictly linear:
/// `Ordered → Packed → Dispatched → OutForDelivery → Delivered`.
/// `Cancelled` is terminal and reachable from any non-delivered state;
/// `PaymentFailed` is terminal and reachable only from `Ordered`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    Ordered,
    Packed,
    Dispatched,
    OutForDelivery,
    Delivered,
    Cancelled,
    PaymentFailed,
}

impl OrderStatus {
    /// Next status on the linear delivery path. `None` for `Delivered`
    /// and the terminal failure states.
    pub fn successor(self) -> Option<OrderStatus> {
        match self {
            Self::Ordered => Some(Self::Packed),
            Self::Packed => Some(Self::Dispatched),
            Self::Dispatched => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled | Self::PaymentFailed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::PaymentFailed)
    }

    /// Index into the order's three-waypoint route for this status:
    /// the parcel sits at the warehouse until dispatch, at the mandi in
    /// transit, and at the customer from out-for-delivery on.
    pub fn waypoint_index(self) -> usize {
        match self {
            Self::Ordered | Self::Packed | Self::PaymentFailed | Self::Cancelled => 0,
            Self::Dispatched => 1,
            Self::OutForDelivery | Self::Delivered => 2,
        }
    }
}

/// Payment axis, orthogonal to the delivery status. A cash-on-delivery
/// order can be `Ordered` + `Pending`; a prepaid order is `Ordered` +
/// `Paid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Declined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    Card,
    CashOnDelivery,
}

/// A named stop on the delivery route with synthetic coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the order's timestamped location history, appended at
/// every status transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub status: OrderStatus,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// A line item snapshotted from the cart at checkout. Copied, not
/// referenced: later catalog changes never retroactively alter a
/// historical order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub carbon_per_unit: Decimal,
}

/// An order created at checkout from the cart snapshot.
///
/// Line items and total are immutable once created; only `status`,
/// `payment_status`, `current_location`, and the derived timestamps
/// mutate over the order's life.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Human-readable order number, e.g. `GL-000017`.
    pub order_number: String,
    pub tracking_id: String,
    /// Fabricated hex string standing in for a distributed-ledger
    /// transaction hash. Cosmetic.
    pub blockchain_tx: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_address: String,
    pub status: OrderStatus,
    /// Fixed three-stop route: warehouse → mandi → customer address.
    pub route: Vec<Waypoint>,
    pub current_location: String,
    pub location_history: Vec<LocationEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancel_reason: Option<String>,
}

impl Order {
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn total_carbon_saved(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.carbon_per_unit * Decimal::from(item.quantity))
            .sum()
    }

    /// The invariant every order must satisfy: total equals the sum of
    /// line totals, with no hidden fees.
    pub fn total_is_consistent(&self) -> bool {
        self.total == self.items.iter().map(|item| item.line_total).sum()
    }
}
