//! Domain model types: catalog products, cart lines, orders, product
//! movement records, warehouses, and notifications.

pub mod cart;
pub mod movement;
pub mod notification;
pub mod order;
pub mod product;
pub mod warehouse;

pub use cart::CartLine;
pub use movement::{Checkpoint, MovementRecord, MovementStatus, MovementTimeline, PricingBreakdown};
pub use notification::{Notification, NotificationKind};
pub use order::{
    LocationEntry, Order, OrderItem, OrderStatus, PaymentMethod, PaymentStatus, Waypoint,
};
pub use product::{Product, QualityGrade};
pub use warehouse::{InventoryItem, WarehouseRecord};
