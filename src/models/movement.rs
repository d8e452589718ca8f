use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

/// The named checkpoints of a product's journey from farm gate to
/// point of sale, in the order they occur.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Checkpoint {
    Harvested,
    QualityChecked,
    DispatchedToWarehouse,
    ArrivedAtWarehouse,
    Processed,
    DispatchedToShop,
    ArrivedAtShop,
    AvailableForSale,
}

impl Checkpoint {
    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Current status of a movement record, derived from the most recent
/// checkpoint reached. Monotonic: the mock never moves backwards.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MovementStatus {
    Harvested,
    QualityChecked,
    InTransitToWarehouse,
    AtWarehouse,
    Processed,
    InTransitToShop,
    AtShop,
    AvailableAtShop,
}

impl MovementStatus {
    /// The checkpoint whose completion puts a record into this status.
    pub fn checkpoint(self) -> Checkpoint {
        match self {
            Self::Harvested => Checkpoint::Harvested,
            Self::QualityChecked => Checkpoint::QualityChecked,
            Self::InTransitToWarehouse => Checkpoint::DispatchedToWarehouse,
            Self::AtWarehouse => Checkpoint::ArrivedAtWarehouse,
            Self::Processed => Checkpoint::Processed,
            Self::InTransitToShop => Checkpoint::DispatchedToShop,
            Self::AtShop => Checkpoint::ArrivedAtShop,
            Self::AvailableAtShop => Checkpoint::AvailableForSale,
        }
    }

    fn for_checkpoint(checkpoint: Checkpoint) -> Self {
        match checkpoint {
            Checkpoint::Harvested => Self::Harvested,
            Checkpoint::QualityChecked => Self::QualityChecked,
            Checkpoint::DispatchedToWarehouse => Self::InTransitToWarehouse,
            Checkpoint::ArrivedAtWarehouse => Self::AtWarehouse,
            Checkpoint::Processed => Self::Processed,
            Checkpoint::DispatchedToShop => Self::InTransitToShop,
            Checkpoint::ArrivedAtShop => Self::AtShop,
            Checkpoint::AvailableForSale => Self::AvailableAtShop,
        }
    }
}

/// Timestamps for each checkpoint. Append-only: each field is set once,
/// strictly in checkpoint order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementTimeline {
    pub harvested: Option<DateTime<Utc>>,
    pub quality_checked: Option<DateTime<Utc>>,
    pub dispatched_to_warehouse: Option<DateTime<Utc>>,
    pub arrived_at_warehouse: Option<DateTime<Utc>>,
    pub processed: Option<DateTime<Utc>>,
    pub dispatched_to_shop: Option<DateTime<Utc>>,
    pub arrived_at_shop: Option<DateTime<Utc>>,
    pub available_for_sale: Option<DateTime<Utc>>,
}

impl MovementTimeline {
    pub fn get(&self, checkpoint: Checkpoint) -> Option<DateTime<Utc>> {
        match checkpoint {
            Checkpoint::Harvested => self.harvested,
            Checkpoint::QualityChecked => self.quality_checked,
            Checkpoint::DispatchedToWarehouse => self.dispatched_to_warehouse,
            Checkpoint::ArrivedAtWarehouse => self.arrived_at_warehouse,
            Checkpoint::Processed => self.processed,
            Checkpoint::DispatchedToShop => self.dispatched_to_shop,
            Checkpoint::ArrivedAtShop => self.arrived_at_shop,
            Checkpoint::AvailableForSale => self.available_for_sale,
        }
    }

    fn set(&mut self, checkpoint: Checkpoint, at: DateTime<Utc>) {
        let slot = match checkpoint {
            Checkpoint::Harvested => &mut self.harvested,
            Checkpoint::QualityChecked => &mut self.quality_checked,
            Checkpoint::DispatchedToWarehouse => &mut self.dispatched_to_warehouse,
            Checkpoint::ArrivedAtWarehouse => &mut self.arrived_at_warehouse,
            Checkpoint::Processed => &mut self.processed,
            Checkpoint::DispatchedToShop => &mut self.dispatched_to_shop,
            Checkpoint::ArrivedAtShop => &mut self.arrived_at_shop,
            Checkpoint::AvailableForSale => &mut self.available_for_sale,
        };
        *slot = Some(at);
    }
}

/// Pricing breakdown along the chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub farmer_price: Decimal,
    pub margin: Decimal,
    pub final_price: Decimal,
}

/// One product's journey from farmer to Uzhavan Santhai shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: Uuid,
    pub crop: String,
    pub quantity: u32,
    pub farmer_name: String,
    /// Uzhavar PIN of the originating farmer.
    pub farmer_pin: String,
    pub warehouse_id: Uuid,
    pub shop_id: Uuid,
    pub pricing: PricingBreakdown,
    /// Sustainability score in 0..=10.
    pub sustainability_score: f64,
    pub carbon_footprint: Decimal,
    pub status: MovementStatus,
    pub timeline: MovementTimeline,
}

impl MovementRecord {
    /// Starts a new record at the `Harvested` checkpoint.
    #[allow(clippy::too_many_arguments)]
    pub fn harvested(
        id: Uuid,
        crop: impl Into<String>,
        quantity: u32,
        farmer_name: impl Into<String>,
        farmer_pin: impl Into<String>,
        warehouse_id: Uuid,
        shop_id: Uuid,
        pricing: PricingBreakdown,
        sustainability_score: f64,
        carbon_footprint: Decimal,
        at: DateTime<Utc>,
    ) -> Self {
        let timeline = MovementTimeline {
            harvested: Some(at),
            ..MovementTimeline::default()
        };
        Self {
            id,
            crop: crop.into(),
            quantity,
            farmer_name: farmer_name.into(),
            farmer_pin: farmer_pin.into(),
            warehouse_id,
            shop_id,
            pricing,
            sustainability_score,
            carbon_footprint,
            status: MovementStatus::Harvested,
            timeline,
        }
    }

    /// Records the next checkpoint. Checkpoints are append-only and
    /// strictly ordered: recording anything other than the immediate
    /// successor of the current status is rejected.
    pub fn record_checkpoint(
        &mut self,
        checkpoint: Checkpoint,
        at: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        if self.timeline.get(checkpoint).is_some() {
            return Err(ServiceError::InvalidOperation(format!(
                "checkpoint {} already recorded for movement {}",
                checkpoint, self.id
            )));
        }
        let expected = self.status.checkpoint().ordinal() + 1;
        if checkpoint.ordinal() != expected {
            return Err(ServiceError::InvalidOperation(format!(
                "movement {} is at {}; cannot record {} out of order",
                self.id, self.status, checkpoint
            )));
        }
        self.timeline.set(checkpoint, at);
        self.status = MovementStatus::for_checkpoint(checkpoint);
        Ok(())
    }

    /// Status/timeline consistency: every checkpoint up to and
    /// including the one implied by the current status is populated,
    /// and none beyond it.
    pub fn is_consistent(&self) -> bool {
        use strum::IntoEnumIterator;
        let reached = self.status.checkpoint().ordinal();
        Checkpoint::iter().all(|cp| (cp.ordinal() <= reached) == self.timeline.get(cp).is_some())
    }
}
