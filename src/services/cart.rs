//! Cart aggregation and mutation.
//!
//! Every function here is pure and total: inputs are borrowed, outputs
//! are new collections, and there are no error cases. Side effects such
//! as toasts or event publication belong to the caller.
//!
//! ```
//! use greenledger::services::cart;
//! use greenledger::seed;
//!
//! let catalog = seed::catalog();
//! let lines = cart::add_item(&[], &catalog[0]);
//! assert_eq!(cart::total_items(&lines), 1);
//! ```

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::models::{CartLine, Product};

/// Sum of `unit_price × quantity` over all lines. Empty cart → 0.
pub fn total_amount(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

/// Sum of quantities. Empty cart → 0.
pub fn total_items(lines: &[CartLine]) -> u32 {
    lines.iter().map(|line| line.quantity).sum()
}

/// Sum of `carbon_per_unit × quantity` over all lines.
pub fn total_carbon_saved(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.carbon_per_unit * Decimal::from(line.quantity))
        .sum()
}

/// Adds one unit of `product`: increments an existing line (clamped to
/// the product's stock) or appends a new line with quantity 1. Adding
/// an out-of-stock product leaves the cart unchanged.
pub fn add_item(lines: &[CartLine], product: &Product) -> Vec<CartLine> {
    let mut next = lines.to_vec();
    match next.iter_mut().find(|line| line.product_id == product.id) {
        Some(line) => {
            let clamped = line.quantity.saturating_add(1).min(line.in_stock);
            if clamped == line.quantity {
                debug!(product = %product.name, stock = line.in_stock, "add clamped at stock");
            }
            line.quantity = clamped;
        }
        None if product.in_stock == 0 => {
            debug!(product = %product.name, "add ignored; out of stock");
        }
        None => next.push(CartLine::from_product(product)),
    }
    next
}

/// Removes one unit of the product with `product_id`; a line reaching
/// quantity 0 is dropped. Unknown ids leave the cart unchanged.
pub fn remove_item(lines: &[CartLine], product_id: Uuid) -> Vec<CartLine> {
    lines
        .iter()
        .filter_map(|line| {
            if line.product_id != product_id {
                return Some(line.clone());
            }
            (line.quantity > 1).then(|| {
                let mut line = line.clone();
                line.quantity -= 1;
                line
            })
        })
        .collect()
}
