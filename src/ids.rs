//! Identifier and hash fabrication.
//!
//! The demo fabricates order numbers, tracking ids, and a cosmetic
//! "blockchain transaction" hash. Generation sits behind a trait so
//! tests can inject a deterministic provider instead of asserting on
//! random output.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub trait IdProvider: Send + Sync {
    fn order_id(&self) -> Uuid;

    /// Human-readable order number, e.g. `GL-000017`.
    fn order_number(&self) -> String;

    /// Carrier-style tracking id, e.g. `TRK-4F7A21C9`.
    fn tracking_id(&self) -> String;

    /// Fabricated ledger transaction hash: `0x` + 64 hex chars.
    fn blockchain_tx(&self) -> String;
}

/// Production provider: random UUIDs and SHA-256 over random bytes.
#[derive(Debug, Default)]
pub struct RandomIdProvider {
    counter: AtomicU64,
}

impl RandomIdProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for RandomIdProvider {
    fn order_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn order_number(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("GL-{n:06}")
    }

    fn tracking_id(&self) -> String {
        let mut bytes = [0u8; 4];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("TRK-{}", hex::encode_upper(bytes))
    }

    fn blockchain_tx(&self) -> String {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        let digest = Sha256::digest(seed);
        format!("0x{}", hex::encode(digest))
    }
}

/// Deterministic provider for tests: sequential ids derived from a
/// counter, stable across runs.
#[derive(Debug, Default)]
pub struct SequenceIdProvider {
    counter: AtomicU64,
}

impl SequenceIdProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdProvider for SequenceIdProvider {
    fn order_id(&self) -> Uuid {
        Uuid::from_u128(self.next() as u128)
    }

    fn order_number(&self) -> String {
        format!("GL-{:06}", self.next())
    }

    fn tracking_id(&self) -> String {
        format!("TRK-{:08}", self.next())
    }

    fn blockchain_tx(&self) -> String {
        let digest = Sha256::digest(self.next().to_be_bytes());
        format!("0x{}", hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_tx_hash_shape() {
        let provider = RandomIdProvider::new();
        let tx = provider.blockchain_tx();
        assert!(tx.starts_with("0x"));
        assert_eq!(tx.len(), 66);
        assert!(tx[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sequence_provider_is_deterministic() {
        let a = SequenceIdProvider::new();
        let b = SequenceIdProvider::new();
        assert_eq!(a.order_number(), b.order_number());
        assert_eq!(a.blockchain_tx(), b.blockchain_tx());
        assert_ne!(a.order_number(), a.order_number());
    }

    #[test]
    fn order_numbers_are_monotonic() {
        let provider = RandomIdProvider::new();
        assert_eq!(provider.order_number(), "GL-000001");
        assert_eq!(provider.order_number(), "GL-000002");
    }
}
