use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

/// One line of the active shopping session: a product snapshot plus a
/// quantity bounded by the product's stock at the time of adding.
///
/// Lines carry the fields aggregation needs rather than a reference
/// back into the catalog, so totals stay stable even if the catalog is
/// reloaded underneath the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub carbon_per_unit: Decimal,
    /// Stock bound captured when the line was created; quantity never
    /// exceeds this.
    pub in_stock: u32,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with quantity 1 from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            carbon_per_unit: product.carbon_per_unit,
            in_stock: product.in_stock,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::QualityGrade;
    use rust_decimal_macros::dec;

    fn sample_product() -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Red Rice".into(),
            price: dec!(72),
            msp_price: dec!(70),
            in_stock: 40,
            quality: QualityGrade::GradeA,
            organic: false,
            rating: 4.4,
            category: "grains".into(),
            delivery_time: "1 day".into(),
            carbon_per_unit: dec!(0.8),
            farmer_name: "Selvi".into(),
            farmer_pin: "UZH-2048".into(),
            farmer_state: "Tamil Nadu".into(),
        }
    }

    #[test]
    fn from_product_snapshots_fields() {
        let product = sample_product();
        let line = CartLine::from_product(&product);
        assert_eq!(line.product_id, product.id);
        assert_eq!(line.unit_price, dec!(72));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.in_stock, 40);
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        let mut line = CartLine::from_product(&sample_product());
        line.quantity = 3;
        assert_eq!(line.line_total(), dec!(216));
    }
}
