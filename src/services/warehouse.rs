//! Warehouse occupancy, stock value, and district rollups.
//!
//! Percentages and values are derived on every call rather than read
//! from a cached field, and every division is guarded: a zero-capacity
//! warehouse reports 0%, not infinity.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::WarehouseRecord;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Occupancy as a percentage of capacity, clamped to `0..=100`.
pub fn occupancy_percentage(warehouse: &WarehouseRecord) -> Decimal {
    if warehouse.capacity <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let occupancy = clamped_occupancy(warehouse);
    occupancy / warehouse.capacity * HUNDRED
}

/// Σ quantity × community-voted price over the warehouse inventory.
pub fn total_stored_value(warehouse: &WarehouseRecord) -> Decimal {
    warehouse
        .inventory
        .iter()
        .map(|item| item.stored_value())
        .sum()
}

/// Inventory quantities grouped by crop name, for charting. BTreeMap
/// keeps chart ordering deterministic.
pub fn crop_distribution(warehouse: &WarehouseRecord) -> BTreeMap<String, Decimal> {
    let mut by_crop: BTreeMap<String, Decimal> = BTreeMap::new();
    for item in &warehouse.inventory {
        *by_crop.entry(item.crop.clone()).or_insert(Decimal::ZERO) += item.quantity;
    }
    by_crop
}

/// Rollup of all warehouses within one district.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistrictRollup {
    pub district: String,
    pub warehouse_count: usize,
    pub total_capacity: Decimal,
    pub total_occupancy: Decimal,
    /// Aggregate occupancy over the district's combined capacity.
    pub occupancy_percentage: Decimal,
}

/// Groups warehouses by district and reduces capacity/occupancy sums.
pub fn district_rollups(warehouses: &[WarehouseRecord]) -> Vec<DistrictRollup> {
    let mut grouped: BTreeMap<String, (usize, Decimal, Decimal)> = BTreeMap::new();
    for warehouse in warehouses {
        let entry = grouped
            .entry(warehouse.district.clone())
            .or_insert((0, Decimal::ZERO, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += warehouse.capacity;
        entry.2 += clamped_occupancy(warehouse);
    }

    grouped
        .into_iter()
        .map(|(district, (count, capacity, occupancy))| DistrictRollup {
            district,
            warehouse_count: count,
            total_capacity: capacity,
            total_occupancy: occupancy,
            occupancy_percentage: if capacity > Decimal::ZERO {
                occupancy / capacity * HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}

/// Occupancy forced into `0..=capacity`. Seed data is the only producer
/// of these records, so out-of-range values are logged, not fatal.
fn clamped_occupancy(warehouse: &WarehouseRecord) -> Decimal {
    let clamped = warehouse
        .occupancy
        .max(Decimal::ZERO)
        .min(warehouse.capacity);
    if clamped != warehouse.occupancy {
        warn!(
            warehouse = %warehouse.name,
            occupancy = %warehouse.occupancy,
            capacity = %warehouse.capacity,
            "occupancy outside 0..=capacity; clamping"
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InventoryItem;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn warehouse(district: &str, capacity: Decimal, occupancy: Decimal) -> WarehouseRecord {
        WarehouseRecord {
            id: Uuid::new_v4(),
            name: format!("{district} Depot"),
            district: district.into(),
            capacity,
            occupancy,
            inventory: vec![
                InventoryItem {
                    crop: "Paddy".into(),
                    variety: "Ponni".into(),
                    quantity: dec!(10),
                    unit_price: dec!(38),
                    community_price: dec!(41),
                },
                InventoryItem {
                    crop: "Paddy".into(),
                    variety: "Sona Masuri".into(),
                    quantity: dec!(5),
                    unit_price: dec!(44),
                    community_price: dec!(45),
                },
                InventoryItem {
                    crop: "Turmeric".into(),
                    variety: "Erode Local".into(),
                    quantity: dec!(2),
                    unit_price: dec!(90),
                    community_price: dec!(95),
                },
            ],
            monthly_inflow: dec!(120),
            monthly_outflow: dec!(95),
            turnover: 0.8,
        }
    }

    #[test]
    fn occupancy_percentage_basic() {
        let w = warehouse("Erode", dec!(200), dec!(50));
        assert_eq!(occupancy_percentage(&w), dec!(25));
    }

    #[test]
    fn zero_capacity_reports_zero_percent() {
        let w = warehouse("Erode", Decimal::ZERO, dec!(10));
        assert_eq!(occupancy_percentage(&w), Decimal::ZERO);
    }

    #[test]
    fn over_capacity_occupancy_is_clamped() {
        let w = warehouse("Erode", dec!(100), dec!(130));
        assert_eq!(occupancy_percentage(&w), dec!(100));

        let negative = warehouse("Erode", dec!(100), dec!(-5));
        assert_eq!(occupancy_percentage(&negative), Decimal::ZERO);
    }

    #[test]
    fn stored_value_sums_community_prices() {
        let w = warehouse("Erode", dec!(200), dec!(17));
        // 10×41 + 5×45 + 2×95 = 825
        assert_eq!(total_stored_value(&w), dec!(825));
    }

    #[test]
    fn crop_distribution_groups_varieties() {
        let w = warehouse("Erode", dec!(200), dec!(17));
        let dist = crop_distribution(&w);
        assert_eq!(dist["Paddy"], dec!(15));
        assert_eq!(dist["Turmeric"], dec!(2));
        assert_eq!(dist.len(), 2);
    }

    #[test]
    fn district_rollups_group_and_reduce() {
        let warehouses = vec![
            warehouse("Erode", dec!(100), dec!(60)),
            warehouse("Erode", dec!(300), dec!(90)),
            warehouse("Salem", dec!(150), dec!(75)),
        ];
        let rollups = district_rollups(&warehouses);
        assert_eq!(rollups.len(), 2);

        let erode = rollups.iter().find(|r| r.district == "Erode").unwrap();
        assert_eq!(erode.warehouse_count, 2);
        assert_eq!(erode.total_capacity, dec!(400));
        assert_eq!(erode.total_occupancy, dec!(150));
        assert_eq!(erode.occupancy_percentage, dec!(37.5));

        let salem = rollups.iter().find(|r| r.district == "Salem").unwrap();
        assert_eq!(salem.warehouse_count, 1);
        assert_eq!(salem.occupancy_percentage, dec!(50));
    }
}
