use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quality grades assigned at the farm gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum QualityGrade {
    Premium,
    GradeA,
    GradeB,
}

/// A catalog entry. Immutable once loaded from the seed catalog; all
/// consumers treat products as read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Consumer unit price.
    pub price: Decimal,
    /// Minimum support price reference, used to show the farmer's
    /// offer relative to the government-set floor.
    pub msp_price: Decimal,
    /// Units available at the time the catalog was loaded.
    pub in_stock: u32,
    pub quality: QualityGrade,
    pub organic: bool,
    pub rating: f64,
    /// Category tag, e.g. "vegetables" or "grains".
    pub category: String,
    /// Human-readable estimate such as "2-3 hours". Free-form: sorting
    /// parses the leading integer and tolerates junk.
    pub delivery_time: String,
    /// Kilograms of CO2 avoided per unit versus conventional supply.
    pub carbon_per_unit: Decimal,
    pub farmer_name: String,
    /// Uzhavar PIN: the farmer's unique identifier code.
    pub farmer_pin: String,
    pub farmer_state: String,
}

impl Product {
    /// Discount (positive) or premium (negative) the farmer offers
    /// relative to the MSP reference.
    pub fn msp_delta(&self) -> Decimal {
        self.msp_price - self.price
    }
}
