//! Deterministic local randomness source
//!
//! `SeededRandomness` resolves synchronously inside the calling operation: it
//! reports no external service and charges no fee. Values come from a sha256
//! hash chain over (seed, counter), so a fixed seed reproduces the same
//! sequence — useful for local deployments and deterministic replay.
//! External asynchronous providers implement the same `RandomnessSource`
//! trait out of crate.

use sha2::{Digest, Sha256};
use types::ids::RequestId;

use crate::interfaces::{RandomnessSource, RequestFee};

/// Synchronous hash-chain randomness source.
#[derive(Debug, Clone)]
pub struct SeededRandomness {
    seed: u64,
    counter: u64,
}

impl SeededRandomness {
    /// Create a source producing the hash chain of `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    fn next_value(&mut self) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(self.counter.to_le_bytes());
        let digest = hasher.finalize();
        self.counter += 1;

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(word)
    }
}

impl RandomnessSource for SeededRandomness {
    fn uses_external_service(&self) -> bool {
        false
    }

    fn request_fee(&self) -> Option<RequestFee> {
        None
    }

    fn request_random_value(&mut self) -> (RequestId, u64) {
        // A synchronous source is never asked to defer; the identifier only
        // exists to satisfy the interface.
        (RequestId::new(), 0)
    }

    fn random_value(&mut self, range: u64) -> (u64, bool) {
        let raw = self.next_value();
        let value = if range == 0 { raw } else { raw % range };
        (value, true)
    }
}
