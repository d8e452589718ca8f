//! The exported JSON receipt document.
//!
//! The shape is a boundary artifact: field names and nesting are fixed
//! (camelCase keys, `greenLedgerReceipt` header block) so downloads
//! stay byte-compatible with the original demo's export.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::Order;

pub const RECEIPT_VERSION: &str = "1.0";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDocument {
    pub green_ledger_receipt: ReceiptHeader,
    pub order_details: OrderDetails,
    pub items: Vec<ReceiptItem>,
    pub financials: Financials,
    pub logistics: Logistics,
    pub sustainability: Sustainability,
    pub certifications: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptHeader {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub doc_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_id: String,
    pub order_number: String,
    pub status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub blockchain_tx: String,
    pub placed_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub currency: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logistics {
    pub tracking_id: String,
    pub delivery_address: String,
    pub current_location: String,
    pub route: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sustainability {
    pub carbon_saved_kg: Decimal,
    pub farm_to_consumer: bool,
}

/// Builds the receipt document for an order. The receipt itemizes tax
/// on top of the order total; the order total itself remains the plain
/// sum of line totals.
pub fn build_receipt(order: &Order, config: &AppConfig) -> ReceiptDocument {
    let subtotal = order.total;
    let tax_rate = Decimal::from_f64_retain(config.tax_rate).unwrap_or(Decimal::ZERO);
    let tax = (subtotal * tax_rate).round_dp(2);

    ReceiptDocument {
        green_ledger_receipt: ReceiptHeader {
            version: RECEIPT_VERSION.to_string(),
            timestamp: Utc::now(),
            doc_type: "purchase_receipt".to_string(),
        },
        order_details: OrderDetails {
            order_id: order.id.to_string(),
            order_number: order.order_number.clone(),
            status: order.status.to_string(),
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            blockchain_tx: order.blockchain_tx.clone(),
            placed_at: order.created_at,
        },
        items: order
            .items
            .iter()
            .map(|item| ReceiptItem {
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total,
            })
            .collect(),
        financials: Financials {
            subtotal,
            tax,
            total: subtotal + tax,
            currency: config.currency.clone(),
        },
        logistics: Logistics {
            tracking_id: order.tracking_id.clone(),
            delivery_address: order.delivery_address.clone(),
            current_location: order.current_location.clone(),
            route: order.route.iter().map(|w| w.label.clone()).collect(),
        },
        sustainability: Sustainability {
            carbon_saved_kg: order.total_carbon_saved(),
            farm_to_consumer: true,
        },
        certifications: vec![
            "GreenLedger Verified Farm".to_string(),
            "Fair Price Guarantee".to_string(),
        ],
    }
}

/// Download file name: `GreenLedger_Receipt_<orderId>_<date>.json`.
pub fn receipt_file_name(order: &Order, on: DateTime<Utc>) -> String {
    format!(
        "GreenLedger_Receipt_{}_{}.json",
        order.order_number,
        on.format("%Y-%m-%d")
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{
        LocationEntry, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Waypoint,
    };
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    pub(crate) fn sample_order() -> Order {
        let now = "2024-06-01T08:00:00Z".parse().unwrap();
        Order {
            id: Uuid::from_u128(7),
            order_number: "GL-000007".into(),
            tracking_id: "TRK-00000042".into(),
            blockchain_tx: format!("0x{}", "ab".repeat(32)),
            items: vec![OrderItem {
                product_id: Uuid::from_u128(1),
                name: "Country Tomatoes".into(),
                quantity: 2,
                unit_price: dec!(85),
                line_total: dec!(170),
                carbon_per_unit: dec!(0.5),
            }],
            total: dec!(170),
            payment_method: PaymentMethod::Upi,
            payment_status: PaymentStatus::Paid,
            delivery_address: "12 Gandhi Street, Coimbatore".into(),
            status: OrderStatus::Ordered,
            route: vec![
                Waypoint {
                    label: "Warehouse".into(),
                    latitude: 11.0,
                    longitude: 76.9,
                },
                Waypoint {
                    label: "Mandi".into(),
                    latitude: 11.3,
                    longitude: 77.7,
                },
                Waypoint {
                    label: "12 Gandhi Street, Coimbatore".into(),
                    latitude: 11.1,
                    longitude: 77.3,
                },
            ],
            current_location: "Warehouse".into(),
            location_history: vec![LocationEntry {
                status: OrderStatus::Ordered,
                location: "Warehouse".into(),
                timestamp: now,
            }],
            created_at: now,
            updated_at: now,
            cancel_reason: None,
        }
    }

    #[test]
    fn financials_itemize_five_percent_tax() {
        let receipt = build_receipt(&sample_order(), &AppConfig::default());
        assert_eq!(receipt.financials.subtotal, dec!(170));
        assert_eq!(receipt.financials.tax, dec!(8.50));
        assert_eq!(receipt.financials.total, dec!(178.50));
        assert_eq!(receipt.financials.currency, "INR");
    }

    #[test]
    fn json_uses_the_fixed_camel_case_shape() {
        let receipt = build_receipt(&sample_order(), &AppConfig::default());
        let value: serde_json::Value = serde_json::to_value(&receipt).unwrap();

        assert_eq!(value["greenLedgerReceipt"]["version"], "1.0");
        assert_eq!(value["greenLedgerReceipt"]["type"], "purchase_receipt");
        assert_eq!(value["orderDetails"]["orderNumber"], "GL-000007");
        assert!(value["items"].as_array().is_some());
        assert_eq!(value["financials"]["currency"], "INR");
        assert!(value["logistics"]["trackingId"].is_string());
        assert!(value["sustainability"]["carbonSavedKg"].is_string());
        assert!(value["certifications"].as_array().unwrap().len() >= 2);
    }

    #[test]
    fn file_name_embeds_order_and_date() {
        let order = sample_order();
        let name = receipt_file_name(&order, order.created_at);
        assert_eq!(name, "GreenLedger_Receipt_GL-000007_2024-06-01.json");
    }
}
