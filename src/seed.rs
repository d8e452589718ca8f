//! Built-in demo data: the produce catalog, warehouse records, and a
//! handful of in-flight movement records.
//!
//! Ids are fixed so that repeated runs (and tests) see the same data.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::models::{
    Checkpoint, InventoryItem, MovementRecord, MovementStatus, PricingBreakdown, Product,
    QualityGrade, WarehouseRecord,
};

pub const WAREHOUSE_COIMBATORE: Uuid = Uuid::from_u128(0xA001);
pub const WAREHOUSE_ERODE: Uuid = Uuid::from_u128(0xA002);
pub const WAREHOUSE_SALEM: Uuid = Uuid::from_u128(0xA003);

pub const SHOP_RS_PURAM: Uuid = Uuid::from_u128(0xB001);
pub const SHOP_GANDHIPURAM: Uuid = Uuid::from_u128(0xB002);

fn seed_time() -> DateTime<Utc> {
    "2024-06-01T06:00:00Z"
        .parse()
        .expect("static seed timestamp")
}

static CATALOG: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        Product {
            id: Uuid::from_u128(0x1001),
            name: "Country Tomatoes".into(),
            price: dec!(45),
            msp_price: dec!(38),
            in_stock: 120,
            quality: QualityGrade::GradeA,
            organic: true,
            rating: 4.6,
            category: "vegetables".into(),
            delivery_time: "2-3 hours".into(),
            carbon_per_unit: dec!(0.4),
            farmer_name: "Muthusamy".into(),
            farmer_pin: "UZH-1042".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1002),
            name: "Salem Mangoes".into(),
            price: dec!(120),
            msp_price: dec!(95),
            in_stock: 60,
            quality: QualityGrade::Premium,
            organic: true,
            rating: 4.9,
            category: "fruits".into(),
            delivery_time: "4-5 hours".into(),
            carbon_per_unit: dec!(0.7),
            farmer_name: "Rani".into(),
            farmer_pin: "UZH-5150".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1003),
            name: "Ponni Rice".into(),
            price: dec!(85),
            msp_price: dec!(78),
            in_stock: 400,
            quality: QualityGrade::GradeA,
            organic: false,
            rating: 4.4,
            category: "grains".into(),
            delivery_time: "1 day".into(),
            carbon_per_unit: dec!(1.1),
            farmer_name: "Kandasamy".into(),
            farmer_pin: "UZH-2210".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1004),
            name: "Erode Turmeric".into(),
            price: dec!(240),
            msp_price: dec!(205),
            in_stock: 35,
            quality: QualityGrade::Premium,
            organic: true,
            rating: 4.8,
            category: "spices".into(),
            delivery_time: "6 hours".into(),
            carbon_per_unit: dec!(0.9),
            farmer_name: "Ponnusamy".into(),
            farmer_pin: "UZH-7731".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1005),
            name: "Small Onions".into(),
            price: dec!(65),
            msp_price: dec!(70),
            in_stock: 200,
            quality: QualityGrade::GradeB,
            organic: false,
            rating: 4.1,
            category: "vegetables".into(),
            delivery_time: "3 hours".into(),
            carbon_per_unit: dec!(0.3),
            farmer_name: "Sellamma".into(),
            farmer_pin: "UZH-3318".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1006),
            name: "Hill Bananas".into(),
            price: dec!(55),
            msp_price: dec!(48),
            in_stock: 90,
            quality: QualityGrade::GradeA,
            organic: true,
            rating: 4.7,
            category: "fruits".into(),
            delivery_time: "5 hours".into(),
            carbon_per_unit: dec!(0.5),
            farmer_name: "Palaniappan".into(),
            farmer_pin: "UZH-6604".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1007),
            name: "Groundnut Oil".into(),
            price: dec!(310),
            msp_price: dec!(280),
            in_stock: 0,
            quality: QualityGrade::Premium,
            organic: false,
            rating: 4.5,
            category: "oils".into(),
            delivery_time: "1-2 days".into(),
            carbon_per_unit: dec!(1.4),
            farmer_name: "Chinnappa".into(),
            farmer_pin: "UZH-8820".into(),
            farmer_state: "Tamil Nadu".into(),
        },
        Product {
            id: Uuid::from_u128(0x1008),
            name: "Curry Leaves".into(),
            price: dec!(15),
            msp_price: dec!(12),
            in_stock: 500,
            quality: QualityGrade::GradeB,
            organic: true,
            rating: 4.2,
            category: "greens".into(),
            delivery_time: "90 minutes".into(),
            carbon_per_unit: dec!(0.1),
            farmer_name: "Valli".into(),
            farmer_pin: "UZH-1042".into(),
            farmer_state: "Tamil Nadu".into(),
        },
    ]
});

/// The demo produce catalog.
pub fn catalog() -> Vec<Product> {
    CATALOG.clone()
}

/// The demo warehouse network.
pub fn warehouses() -> Vec<WarehouseRecord> {
    vec![
        WarehouseRecord {
            id: WAREHOUSE_COIMBATORE,
            name: "Coimbatore Central".into(),
            district: "Coimbatore".into(),
            capacity: dec!(400),
            occupancy: dec!(150),
            inventory: vec![
                InventoryItem {
                    crop: "Paddy".into(),
                    variety: "Ponni".into(),
                    quantity: dec!(90),
                    unit_price: dec!(38),
                    community_price: dec!(41),
                },
                InventoryItem {
                    crop: "Turmeric".into(),
                    variety: "Erode Local".into(),
                    quantity: dec!(60),
                    unit_price: dec!(205),
                    community_price: dec!(212),
                },
            ],
            monthly_inflow: dec!(220),
            monthly_outflow: dec!(190),
            turnover: 1.27,
        },
        WarehouseRecord {
            id: WAREHOUSE_ERODE,
            name: "Erode Mandi Store".into(),
            district: "Erode".into(),
            capacity: dec!(250),
            occupancy: dec!(205),
            inventory: vec![
                InventoryItem {
                    crop: "Turmeric".into(),
                    variety: "Erode Local".into(),
                    quantity: dec!(140),
                    unit_price: dec!(205),
                    community_price: dec!(215),
                },
                InventoryItem {
                    crop: "Onion".into(),
                    variety: "Small Red".into(),
                    quantity: dec!(65),
                    unit_price: dec!(28),
                    community_price: dec!(26),
                },
            ],
            monthly_inflow: dec!(130),
            monthly_outflow: dec!(105),
            turnover: 0.94,
        },
        WarehouseRecord {
            id: WAREHOUSE_SALEM,
            name: "Salem Cold Chain".into(),
            district: "Salem".into(),
            capacity: dec!(180),
            occupancy: dec!(62),
            inventory: vec![InventoryItem {
                crop: "Mango".into(),
                variety: "Salem Gundu".into(),
                quantity: dec!(62),
                unit_price: dec!(95),
                community_price: dec!(102),
            }],
            monthly_inflow: dec!(88),
            monthly_outflow: dec!(96),
            turnover: 1.55,
        },
    ]
}

fn movement_at(
    id: u128,
    crop: &str,
    quantity: u32,
    farmer_name: &str,
    farmer_pin: &str,
    warehouse_id: Uuid,
    shop_id: Uuid,
    pricing: PricingBreakdown,
    sustainability_score: f64,
    carbon_footprint: rust_decimal::Decimal,
    target: MovementStatus,
) -> MovementRecord {
    let start = seed_time();
    let mut record = MovementRecord::harvested(
        Uuid::from_u128(id),
        crop,
        quantity,
        farmer_name,
        farmer_pin,
        warehouse_id,
        shop_id,
        pricing,
        sustainability_score,
        carbon_footprint,
        start,
    );
    let reached = target.checkpoint().ordinal();
    for (step, checkpoint) in [
        Checkpoint::QualityChecked,
        Checkpoint::DispatchedToWarehouse,
        Checkpoint::ArrivedAtWarehouse,
        Checkpoint::Processed,
        Checkpoint::DispatchedToShop,
        Checkpoint::ArrivedAtShop,
        Checkpoint::AvailableForSale,
    ]
    .into_iter()
    .enumerate()
    {
        if checkpoint.ordinal() > reached {
            break;
        }
        record
            .record_checkpoint(checkpoint, start + Duration::hours(step as i64 + 1))
            .expect("seed checkpoints are applied in order");
    }
    record
}

/// In-flight movement records at various points along the chain.
pub fn movements() -> Vec<MovementRecord> {
    vec![
        movement_at(
            0xC001,
            "Turmeric",
            120,
            "Ponnusamy",
            "UZH-7731",
            WAREHOUSE_ERODE,
            SHOP_RS_PURAM,
            PricingBreakdown {
                farmer_price: dec!(205),
                margin: dec!(35),
                final_price: dec!(240),
            },
            8.5,
            dec!(14.2),
            MovementStatus::AvailableAtShop,
        ),
        movement_at(
            0xC002,
            "Tomato",
            300,
            "Muthusamy",
            "UZH-1042",
            WAREHOUSE_COIMBATORE,
            SHOP_GANDHIPURAM,
            PricingBreakdown {
                farmer_price: dec!(38),
                margin: dec!(7),
                final_price: dec!(45),
            },
            7.8,
            dec!(9.6),
            MovementStatus::AtWarehouse,
        ),
        movement_at(
            0xC003,
            "Mango",
            80,
            "Rani",
            "UZH-5150",
            WAREHOUSE_SALEM,
            SHOP_RS_PURAM,
            PricingBreakdown {
                farmer_price: dec!(95),
                margin: dec!(25),
                final_price: dec!(120),
            },
            9.1,
            dec!(11.3),
            MovementStatus::InTransitToShop,
        ),
        movement_at(
            0xC004,
            "Banana",
            150,
            "Palaniappan",
            "UZH-6604",
            WAREHOUSE_COIMBATORE,
            SHOP_GANDHIPURAM,
            PricingBreakdown {
                farmer_price: dec!(48),
                margin: dec!(7),
                final_price: dec!(55),
            },
            8.0,
            dec!(8.8),
            MovementStatus::Harvested,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique_and_stable() {
        let first = catalog();
        let second = catalog();
        assert_eq!(first, second);

        let ids: HashSet<_> = first.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), first.len());
    }

    #[test]
    fn catalog_has_an_out_of_stock_product() {
        assert!(catalog().iter().any(|p| p.in_stock == 0));
    }

    #[test]
    fn warehouses_stay_within_capacity() {
        for warehouse in warehouses() {
            assert!(warehouse.occupancy <= warehouse.capacity, "{}", warehouse.name);
        }
    }

    #[test]
    fn seeded_movements_are_consistent() {
        for movement in movements() {
            assert!(movement.is_consistent(), "movement {}", movement.id);
        }
    }
}
