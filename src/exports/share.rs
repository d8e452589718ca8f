//! Share-text export: the short message a buyer posts after checkout.

use crate::models::Order;

const HASHTAGS: &str = "#GreenLedger #FarmToConsumer #EatLocal";

/// Shortened transaction hash for display: first 10 characters, an
/// ellipsis, and the last 4.
pub fn truncate_tx_hash(tx: &str) -> String {
    if tx.len() <= 14 {
        return tx.to_string();
    }
    format!("{}…{}", &tx[..10], &tx[tx.len() - 4..])
}

/// Builds the share message for an order.
pub fn share_text(order: &Order) -> String {
    format!(
        "I just ordered {item_count} farm-fresh item(s) on GreenLedger (order {number}, \
         ₹{total})! Saved {carbon} kg of CO₂ by buying direct from farmers. \
         Verified on-chain: {tx} · Track it: {tracking} {hashtags}",
        item_count = order.total_items(),
        number = order.order_number,
        total = order.total.round_dp(2),
        carbon = order.total_carbon_saved().round_dp(2),
        tx = truncate_tx_hash(&order.blockchain_tx),
        tracking = order.tracking_id,
        hashtags = HASHTAGS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exports::receipt::tests::sample_order;

    #[test]
    fn share_text_carries_the_key_facts() {
        let order = sample_order();
        let text = share_text(&order);
        assert!(text.contains("GL-000007"));
        assert!(text.contains("₹170"));
        assert!(text.contains("2 farm-fresh item(s)"));
        assert!(text.contains("1.0 kg of CO₂"));
        assert!(text.contains("TRK-00000042"));
        assert!(text.contains("#GreenLedger"));
        // Full 66-char hash never appears
        assert!(!text.contains(&order.blockchain_tx));
    }

    #[test]
    fn tx_hash_truncation() {
        let tx = format!("0x{}", "ab".repeat(32));
        let short = truncate_tx_hash(&tx);
        assert_eq!(short, "0xabababab…abab");
        // Short values pass through untouched
        assert_eq!(truncate_tx_hash("0x1234"), "0x1234");
    }
}
