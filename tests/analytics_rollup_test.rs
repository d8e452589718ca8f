use greenledger::models::MovementStatus;
use greenledger::seed;
use greenledger::services::movement_analytics::{summarize, MovementQuery};
use greenledger::services::warehouse;
use rust_decimal_macros::dec;

// ==================== Movement analytics over seed data ====================

#[test]
fn seed_movement_summary_adds_up() {
    let records = seed::movements();
    let summary = summarize(&records);

    assert_eq!(summary.total_products, 4);
    assert_eq!(summary.total_quantity, 650);
    // 120×205 + 300×38 + 80×95 + 150×48
    assert_eq!(summary.total_value, dec!(50800));
    assert_eq!(summary.total_carbon_footprint, dec!(43.9));
    assert!((summary.avg_sustainability_score - 8.35).abs() < 1e-9);
    assert_eq!(summary.status_counts[&MovementStatus::AvailableAtShop], 1);
    assert_eq!(summary.status_counts[&MovementStatus::Harvested], 1);
}

#[test]
fn query_narrows_before_summarizing() {
    let records = seed::movements();
    let coimbatore = MovementQuery {
        warehouse_id: Some(seed::WAREHOUSE_COIMBATORE),
        ..Default::default()
    };
    let narrowed = coimbatore.apply(&records);
    assert_eq!(narrowed.len(), 2);

    let summary = summarize(&narrowed);
    assert_eq!(summary.total_quantity, 450);
    // 300×38 + 150×48
    assert_eq!(summary.total_value, dec!(18600));
}

#[test]
fn farmer_pin_query_isolates_one_farmer() {
    let records = seed::movements();
    let query = MovementQuery {
        farmer_pin: Some("UZH-7731".into()),
        ..Default::default()
    };
    let hits = query.apply(&records);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].crop, "Turmeric");
    assert!(hits[0].is_consistent());
}

// ==================== Warehouse rollups over seed data ====================

#[test]
fn seed_warehouse_occupancy_percentages() {
    let warehouses = seed::warehouses();
    let coimbatore = warehouses
        .iter()
        .find(|w| w.district == "Coimbatore")
        .unwrap();
    assert_eq!(warehouse::occupancy_percentage(coimbatore), dec!(37.5));

    let erode = warehouses.iter().find(|w| w.district == "Erode").unwrap();
    assert_eq!(warehouse::occupancy_percentage(erode), dec!(82));
}

#[test]
fn seed_stored_value_uses_community_prices() {
    let warehouses = seed::warehouses();
    let coimbatore = warehouses
        .iter()
        .find(|w| w.district == "Coimbatore")
        .unwrap();
    // 90×41 + 60×212
    assert_eq!(warehouse::total_stored_value(coimbatore), dec!(16410));

    let crops = warehouse::crop_distribution(coimbatore);
    assert_eq!(crops["Paddy"], dec!(90));
    assert_eq!(crops["Turmeric"], dec!(60));
}

#[test]
fn district_rollups_cover_every_seed_district() {
    let warehouses = seed::warehouses();
    let rollups = warehouse::district_rollups(&warehouses);
    assert_eq!(rollups.len(), 3);
    // BTreeMap grouping: districts come out sorted
    let districts: Vec<&str> = rollups.iter().map(|r| r.district.as_str()).collect();
    assert_eq!(districts, vec!["Coimbatore", "Erode", "Salem"]);
    for rollup in &rollups {
        assert_eq!(rollup.warehouse_count, 1);
        assert!(rollup.occupancy_percentage <= dec!(100));
    }
}
