//! Printable HTML receipt.
//!
//! Sections render in a fixed order: header, order info, blockchain
//! verification, items table, payment, delivery, sustainability,
//! grand total, footer.

use rust_decimal::Decimal;

use crate::config::AppConfig;
use crate::models::Order;

/// Minimal HTML escaping for text interpolated into the document.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{} {}", currency, amount.round_dp(2))
}

/// Renders the full printable receipt document.
pub fn render_receipt_html(order: &Order, config: &AppConfig) -> String {
    let currency = config.currency.as_str();
    let subtotal = order.total;
    let tax_rate = Decimal::from_f64_retain(config.tax_rate).unwrap_or(Decimal::ZERO);
    let tax = (subtotal * tax_rate).round_dp(2);
    let grand_total = subtotal + tax;

    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>GreenLedger Receipt {}</title>\n",
        escape(&order.order_number)
    ));
    html.push_str("<style>body{font-family:sans-serif;max-width:640px;margin:auto}");
    html.push_str("table{width:100%;border-collapse:collapse}");
    html.push_str("td,th{border-bottom:1px solid #ddd;padding:6px;text-align:left}");
    html.push_str(".total{font-size:1.2em;font-weight:bold}");
    html.push_str("footer{color:#666;font-size:0.8em;margin-top:2em}</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<h1>GreenLedger</h1>\n");
    html.push_str("<p>Farm to consumer, verified end to end.</p>\n");

    // Order info
    html.push_str("<section id=\"order\">\n<h2>Order</h2>\n");
    html.push_str(&format!(
        "<p>Order {} &middot; placed {}</p>\n",
        escape(&order.order_number),
        order.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html.push_str(&format!("<p>Status: {}</p>\n", order.status));
    html.push_str("</section>\n");

    // Blockchain verification
    html.push_str("<section id=\"blockchain\">\n<h2>Blockchain Verification</h2>\n");
    html.push_str(&format!(
        "<p><code>{}</code></p>\n",
        escape(&order.blockchain_tx)
    ));
    html.push_str("</section>\n");

    // Items
    html.push_str("<section id=\"items\">\n<h2>Items</h2>\n<table>\n");
    html.push_str("<tr><th>Item</th><th>Qty</th><th>Unit</th><th>Total</th></tr>\n");
    for item in &order.items {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&item.name),
            item.quantity,
            money(item.unit_price, currency),
            money(item.line_total, currency),
        ));
    }
    html.push_str("</table>\n</section>\n");

    // Payment
    html.push_str("<section id=\"payment\">\n<h2>Payment</h2>\n");
    html.push_str(&format!(
        "<p>{} &middot; {}</p>\n",
        order.payment_method, order.payment_status
    ));
    html.push_str("</section>\n");

    // Delivery
    html.push_str("<section id=\"delivery\">\n<h2>Delivery</h2>\n");
    html.push_str(&format!(
        "<p>{}</p>\n<p>Tracking: {}</p>\n<p>Currently at: {}</p>\n",
        escape(&order.delivery_address),
        escape(&order.tracking_id),
        escape(&order.current_location),
    ));
    html.push_str("</section>\n");

    // Sustainability
    html.push_str("<section id=\"sustainability\">\n<h2>Sustainability</h2>\n");
    html.push_str(&format!(
        "<p>{} kg CO&#8322; saved by buying farm-direct.</p>\n",
        order.total_carbon_saved().round_dp(2)
    ));
    html.push_str("</section>\n");

    // Grand total
    html.push_str("<section id=\"total\">\n");
    html.push_str(&format!(
        "<p>Subtotal: {}</p>\n<p>Tax: {}</p>\n<p class=\"total\">Total: {}</p>\n",
        money(subtotal, currency),
        money(tax, currency),
        money(grand_total, currency),
    ));
    html.push_str("</section>\n");

    // Footer
    html.push_str("<footer>Thank you for supporting local farmers.</footer>\n");
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::receipt::tests::sample_order;

    #[test]
    fn sections_appear_in_fixed_order() {
        let html = render_receipt_html(&sample_order(), &AppConfig::default());
        let positions: Vec<usize> = [
            "<h1>GreenLedger</h1>",
            "id=\"order\"",
            "id=\"blockchain\"",
            "id=\"items\"",
            "id=\"payment\"",
            "id=\"delivery\"",
            "id=\"sustainability\"",
            "id=\"total\"",
            "<footer>",
        ]
        .iter()
        .map(|marker| html.find(marker).expect(marker))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn totals_include_tax_line() {
        let html = render_receipt_html(&sample_order(), &AppConfig::default());
        assert!(html.contains("Subtotal: INR 170"));
        assert!(html.contains("Tax: INR 8.50"));
        assert!(html.contains("Total: INR 178.50"));
    }

    #[test]
    fn item_names_are_escaped() {
        let mut order = sample_order();
        order.items[0].name = "Chillies <extra hot>".into();
        let html = render_receipt_html(&order, &AppConfig::default());
        assert!(html.contains("Chillies &lt;extra hot&gt;"));
        assert!(!html.contains("<extra hot>"));
    }
}
