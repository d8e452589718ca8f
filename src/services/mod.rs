//! The engine's services: pure data-transformation functions over the
//! in-memory domain model, plus the thin stateful wrappers that own
//! stores and publish events.

pub mod cart;
pub mod catalog;
pub mod movement_analytics;
pub mod notifications;
pub mod orders;
pub mod warehouse;

pub use catalog::{CategoryFilter, SortKey};
pub use movement_analytics::{MovementQuery, MovementSummary};
pub use notifications::NotificationService;
pub use orders::{CheckoutInput, OrderService};
pub use warehouse::DistrictRollup;
