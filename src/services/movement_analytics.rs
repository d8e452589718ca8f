//! Aggregation over product-movement records.
//!
//! All sums and counts are commutative, so no ordering is required of
//! the input, and every division is guarded: an empty record set
//! produces zeros, never NaN.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MovementRecord, MovementStatus};

/// Optional predicates narrowing a record set before aggregation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovementQuery {
    pub farmer_pin: Option<String>,
    pub warehouse_id: Option<Uuid>,
    pub shop_id: Option<Uuid>,
    /// Matches records harvested on or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Matches records harvested strictly before this instant.
    pub to: Option<DateTime<Utc>>,
}

impl MovementQuery {
    pub fn matches(&self, record: &MovementRecord) -> bool {
        if let Some(pin) = &self.farmer_pin {
            if record.farmer_pin != *pin {
                return false;
            }
        }
        if let Some(id) = self.warehouse_id {
            if record.warehouse_id != id {
                return false;
            }
        }
        if let Some(id) = self.shop_id {
            if record.shop_id != id {
                return false;
            }
        }
        if self.from.is_some() || self.to.is_some() {
            let Some(harvested) = record.timeline.harvested else {
                return false;
            };
            if self.from.is_some_and(|from| harvested < from) {
                return false;
            }
            if self.to.is_some_and(|to| harvested >= to) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, records: &[MovementRecord]) -> Vec<MovementRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Summary statistics for a movement record set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovementSummary {
    pub total_products: usize,
    pub total_quantity: u64,
    /// Σ quantity × farmer price.
    pub total_value: Decimal,
    /// Mean sustainability score; 0.0 for an empty set.
    pub avg_sustainability_score: f64,
    pub total_carbon_footprint: Decimal,
    pub status_counts: HashMap<MovementStatus, usize>,
}

pub fn summarize(records: &[MovementRecord]) -> MovementSummary {
    let total_quantity = records.iter().map(|r| u64::from(r.quantity)).sum();
    let total_value = records
        .iter()
        .map(|r| Decimal::from(r.quantity) * r.pricing.farmer_price)
        .sum();
    let total_carbon_footprint = records.iter().map(|r| r.carbon_footprint).sum();

    let avg_sustainability_score = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.sustainability_score).sum::<f64>() / records.len() as f64
    };

    let mut status_counts: HashMap<MovementStatus, usize> = HashMap::new();
    for record in records {
        *status_counts.entry(record.status).or_insert(0) += 1;
    }

    MovementSummary {
        total_products: records.len(),
        total_quantity,
        total_value,
        avg_sustainability_score,
        total_carbon_footprint,
        status_counts,
    }
}
