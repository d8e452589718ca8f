//! Demo binary: runs one scripted purchase end to end and prints the
//! receipt artifacts.

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use tracing::info;

use greenledger::config;
use greenledger::events::{self, Event, EventSender};
use greenledger::exports;
use greenledger::ids::RandomIdProvider;
use greenledger::models::PaymentMethod;
use greenledger::services::{cart, catalog, movement_analytics, warehouse};
use greenledger::services::{CategoryFilter, CheckoutInput, SortKey};
use greenledger::sim::{DeliverySimulator, SimClock};
use greenledger::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    config::init_tracing(&cfg.log_level, cfg.log_json);

    let (event_sender, event_rx) = EventSender::channel(1024);
    let state = AppState::with_seed_data(
        cfg.clone(),
        Arc::new(RandomIdProvider::new()),
        event_sender,
    );
    tokio::spawn(events::process_events(
        event_rx,
        Arc::clone(&state.notifications),
    ));

    // Browse: organic produce, cheapest first
    let picks = catalog::sort(
        &catalog::filter(&state.catalog, "", &CategoryFilter::Organic),
        SortKey::PriceLow,
    );
    info!(count = picks.len(), "organic products available");

    // Fill the cart with the two cheapest picks, one of them twice
    let mut lines = Vec::new();
    for product in picks.iter().take(2) {
        lines = cart::add_item(&lines, product);
        state
            .event_sender
            .send_or_log(Event::CartItemAdded {
                product_id: product.id,
                quantity: 1,
            })
            .await;
    }
    if let Some(first) = picks.first() {
        lines = cart::add_item(&lines, first);
        state
            .event_sender
            .send_or_log(Event::CartItemAdded {
                product_id: first.id,
                quantity: 1,
            })
            .await;
    }
    // Second thoughts about the second pick
    if let Some(second) = picks.get(1) {
        lines = cart::remove_item(&lines, second.id);
        state
            .event_sender
            .send_or_log(Event::CartItemRemoved {
                product_id: second.id,
            })
            .await;
    }
    info!(
        items = cart::total_items(&lines),
        total = %cart::total_amount(&lines),
        carbon_saved = %cart::total_carbon_saved(&lines),
        "cart ready"
    );

    // Checkout
    let order = state
        .order_service
        .create_order(
            &lines,
            CheckoutInput {
                delivery_address: "12 Gandhi Street, RS Puram, Coimbatore".into(),
                payment_method: PaymentMethod::Upi,
                otp: None,
            },
        )
        .await?;
    info!(order = %order.order_number, total = %order.total, "order placed");

    // Run the delivery on the virtual clock
    let mut clock = SimClock::starting_at(Utc::now());
    let mut sim = DeliverySimulator::new(
        Duration::seconds(cfg.delivery_advance_interval_secs as i64),
        Duration::seconds(cfg.refresh_interval_secs as i64),
    );
    sim.schedule_delivery(&order, clock.now());
    while sim.pending_tasks() > 0 {
        let now = clock.advance(Duration::seconds(cfg.delivery_advance_interval_secs as i64));
        sim.run_until(&state.order_service, now).await?;
    }
    let delivered = state
        .order_service
        .get(order.id)
        .context("order vanished from the store")?;
    info!(status = %delivered.status, at = %delivered.current_location, "delivery finished");

    // Export the receipt artifacts
    let receipt = exports::build_receipt(&delivered, &cfg);
    let file_name = exports::receipt_file_name(&delivered, Utc::now());
    fs::write(&file_name, serde_json::to_string_pretty(&receipt)?)
        .with_context(|| format!("writing {file_name}"))?;
    info!(file = %file_name, "receipt written");

    let html_name = file_name.replace(".json", ".html");
    fs::write(&html_name, exports::render_receipt_html(&delivered, &cfg))
        .with_context(|| format!("writing {html_name}"))?;

    println!("{}", exports::share_text(&delivered));

    // Dashboard rollups over the seed data
    let summary = movement_analytics::summarize(&state.movements);
    info!(
        products = summary.total_products,
        value = %summary.total_value,
        avg_sustainability = summary.avg_sustainability_score,
        "movement summary"
    );
    for rollup in warehouse::district_rollups(&state.warehouses) {
        info!(
            district = %rollup.district,
            warehouses = rollup.warehouse_count,
            occupancy_pct = %rollup.occupancy_percentage,
            "district rollup"
        );
    }

    info!(
        unread = state.notifications.unread_count(),
        "notifications pending"
    );
    Ok(())
}
