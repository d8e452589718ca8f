use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One inventory line inside a warehouse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub crop: String,
    pub variety: String,
    /// Quantity in tonnes.
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Community-voted price used for stock valuation.
    pub community_price: Decimal,
}

impl InventoryItem {
    pub fn stored_value(&self) -> Decimal {
        self.quantity * self.community_price
    }
}

/// A warehouse with capacity, current stock, and rollup inputs.
///
/// Occupancy percentage and stock value are always derived from this
/// record, never cached: consumers call the warehouse service rather
/// than reading a stored figure that may have gone stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub id: Uuid,
    pub name: String,
    pub district: String,
    /// Capacity in tonnes.
    pub capacity: Decimal,
    /// Current occupancy in tonnes. Expected within `0..=capacity`;
    /// rollups clamp and warn if seed data violates this.
    pub occupancy: Decimal,
    pub inventory: Vec<InventoryItem>,
    /// Tonnes received this month.
    pub monthly_inflow: Decimal,
    /// Tonnes shipped out this month.
    pub monthly_outflow: Decimal,
    /// Stock turnover ratio for the dashboard.
    pub turnover: f64,
}
