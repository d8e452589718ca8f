use std::sync::Arc;

use greenledger::config::AppConfig;
use greenledger::events::{self, EventSender};
use greenledger::ids::SequenceIdProvider;
use greenledger::models::Product;
use greenledger::AppState;

/// The application wired the way the demo binary wires it, but with
/// deterministic ids. Events flow into the notification store through
/// the same background loop.
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let (event_sender, event_rx) = EventSender::channel(256);
        let state = AppState::with_seed_data(
            AppConfig::default(),
            Arc::new(SequenceIdProvider::new()),
            event_sender,
        );
        tokio::spawn(events::process_events(
            event_rx,
            Arc::clone(&state.notifications),
        ));
        Self { state }
    }

    #[allow(dead_code)]
    pub fn product_named(&self, name: &str) -> Product {
        self.state
            .catalog
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("seed catalog has no product named {name}"))
            .clone()
    }
}
