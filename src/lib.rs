//! GreenLedger Demo Engine
//!
//! In-memory engine behind a mock farm-to-consumer marketplace: cart
//! arithmetic, catalog filtering, an order lifecycle state machine,
//! movement analytics, warehouse rollups, receipt exports, and a
//! deterministic delivery simulation on a virtual clock.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod errors;
pub mod events;
pub mod exports;
pub mod ids;
pub mod models;
pub mod seed;
pub mod services;
pub mod sim;

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::ids::IdProvider;
use crate::models::{MovementRecord, Order, Product, WarehouseRecord};
use crate::services::{NotificationService, OrderService};

/// Shared application state: the seed catalog plus the mutable
/// in-memory stores every service works against.
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub catalog: Arc<Vec<Product>>,
    pub orders: Arc<DashMap<Uuid, Order>>,
    pub movements: Arc<Vec<MovementRecord>>,
    pub warehouses: Arc<Vec<WarehouseRecord>>,
    pub order_service: OrderService,
    pub notifications: Arc<NotificationService>,
    pub event_sender: events::EventSender,
}

impl AppState {
    /// Builds state over the seed data with the given id provider.
    pub fn with_seed_data(
        config: config::AppConfig,
        ids: Arc<dyn IdProvider>,
        event_sender: events::EventSender,
    ) -> Self {
        let orders = Arc::new(DashMap::new());
        Self {
            config,
            catalog: Arc::new(seed::catalog()),
            orders: Arc::clone(&orders),
            movements: Arc::new(seed::movements()),
            warehouses: Arc::new(seed::warehouses()),
            order_service: OrderService::new(orders, ids, event_sender.clone()),
            notifications: Arc::new(NotificationService::new()),
            event_sender,
        }
    }
}
