//! Delivery progression driver: turns scheduled actions into order
//! state transitions.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::Order;
use crate::services::orders::OrderService;

use super::scheduler::{SimAction, TaskHandle, TaskQueue};

/// Drives orders through their delivery lifecycle on the virtual
/// timeline. Owns the task queue; the caller owns the clock.
pub struct DeliverySimulator {
    queue: TaskQueue,
    advance_interval: Duration,
    refresh_interval: Duration,
}

impl DeliverySimulator {
    pub fn new(advance_interval: Duration, refresh_interval: Duration) -> Self {
        Self {
            queue: TaskQueue::new(),
            advance_interval,
            refresh_interval,
        }
    }

    /// Schedules the four delivery advances for a fresh order, spaced
    /// `advance_interval` apart starting one interval after `from`.
    pub fn schedule_delivery(&mut self, order: &Order, from: DateTime<Utc>) -> Vec<TaskHandle> {
        (1..=4)
            .map(|step| {
                self.queue.schedule(
                    from + self.advance_interval * step,
                    SimAction::AdvanceOrder(order.id),
                )
            })
            .collect()
    }

    /// Schedules the periodic refresh tick; it reschedules itself each
    /// time it fires. The returned handle cancels the next pending
    /// tick.
    pub fn schedule_refresh(&mut self, from: DateTime<Utc>) -> TaskHandle {
        self.queue
            .schedule(from + self.refresh_interval, SimAction::RefreshTick)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.queue.cancel(handle)
    }

    pub fn pending_tasks(&self) -> usize {
        self.queue.pending()
    }

    /// Runs every task due at or before `now` against the order store.
    /// Returns the ids of orders touched by fired tasks.
    pub async fn run_until(
        &mut self,
        orders: &OrderService,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, ServiceError> {
        let mut changed = Vec::new();
        for action in self.queue.run_due(now) {
            match action {
                SimAction::AdvanceOrder(order_id) => {
                    match orders.advance(order_id).await {
                        Ok(order) => changed.push(order.id),
                        // An order cancelled mid-simulation leaves stale
                        // tasks behind; skipping them is expected.
                        Err(ServiceError::NotFound(msg)) => {
                            debug!("skipping stale advance task: {}", msg);
                        }
                        Err(err) => return Err(err),
                    }
                }
                SimAction::RefreshTick => {
                    for order in orders.list() {
                        if !order.status.is_terminal() {
                            orders.advance(order.id).await?;
                            changed.push(order.id);
                        }
                    }
                    self.schedule_refresh(now);
                }
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventSender;
    use crate::ids::SequenceIdProvider;
    use crate::models::{OrderStatus, PaymentMethod, Product, QualityGrade};
    use crate::services::cart;
    use crate::services::orders::CheckoutInput;
    use dashmap::DashMap;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn order_service() -> OrderService {
        let (event_sender, mut rx) = EventSender::channel(256);
        tokio::spawn(async move { while rx.recv().await.is_some() {} });
        OrderService::new(
            Arc::new(DashMap::new()),
            Arc::new(SequenceIdProvider::new()),
            event_sender,
        )
    }

    async fn place_order(orders: &OrderService) -> Order {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Mangoes".into(),
            price: dec!(120),
            msp_price: dec!(110),
            in_stock: 60,
            quality: QualityGrade::Premium,
            organic: true,
            rating: 4.9,
            category: "fruits".into(),
            delivery_time: "4-5 hours".into(),
            carbon_per_unit: dec!(0.7),
            farmer_name: "Rani".into(),
            farmer_pin: "UZH-5150".into(),
            farmer_state: "Tamil Nadu".into(),
        };
        let lines = cart::add_item(&[], &product);
        orders
            .create_order(
                &lines,
                CheckoutInput {
                    delivery_address: "4 Car Street, Salem".into(),
                    payment_method: PaymentMethod::Upi,
                    otp: None,
                },
            )
            .await
            .unwrap()
    }

    fn t0() -> DateTime<Utc> {
        "2024-06-01T08:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn scheduled_delivery_completes_on_the_virtual_timeline() {
        let orders = order_service();
        let order = place_order(&orders).await;

        let mut sim = DeliverySimulator::new(Duration::seconds(20), Duration::seconds(300));
        sim.schedule_delivery(&order, t0());
        assert_eq!(sim.pending_tasks(), 4);

        // Halfway through: two advances fired
        sim.run_until(&orders, t0() + Duration::seconds(45)).await.unwrap();
        assert_eq!(orders.get(order.id).unwrap().status, OrderStatus::Dispatched);

        // Past the end: delivered
        sim.run_until(&orders, t0() + Duration::seconds(200)).await.unwrap();
        assert_eq!(orders.get(order.id).unwrap().status, OrderStatus::Delivered);
        assert_eq!(sim.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn refresh_tick_nudges_in_flight_orders_and_reschedules() {
        let orders = order_service();
        let order = place_order(&orders).await;

        let mut sim = DeliverySimulator::new(Duration::seconds(20), Duration::seconds(30));
        sim.schedule_refresh(t0());

        let changed = sim
            .run_until(&orders, t0() + Duration::seconds(30))
            .await
            .unwrap();
        assert_eq!(changed, vec![order.id]);
        assert_eq!(orders.get(order.id).unwrap().status, OrderStatus::Packed);
        // Tick rescheduled itself
        assert_eq!(sim.pending_tasks(), 1);
    }

    #[tokio::test]
    async fn cancelling_the_refresh_handle_stops_the_tick() {
        let orders = order_service();
        place_order(&orders).await;

        let mut sim = DeliverySimulator::new(Duration::seconds(20), Duration::seconds(30));
        let handle = sim.schedule_refresh(t0());
        assert!(sim.cancel(handle));

        let changed = sim
            .run_until(&orders, t0() + Duration::minutes(10))
            .await
            .unwrap();
        assert!(changed.is_empty());
        assert_eq!(sim.pending_tasks(), 0);
    }
}
