//! Simulated time: the scheduler and the delivery progression driver.

pub mod delivery;
pub mod scheduler;

pub use delivery::DeliverySimulator;
pub use scheduler::{SimAction, SimClock, TaskHandle, TaskQueue};
