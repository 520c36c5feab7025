//! Contract number generation
//!
//! Contract numbers look like `TRX4F7Q2M9BX`: a fixed prefix plus nine
//! characters drawn from uppercase A-Z and 0-9. Uniqueness is
//! probabilistic; the ledger's unique constraint is the backstop and the
//! engine retries with a fresh number on a collision.
//!
//! The generator owns its RNG. Nothing in the workspace touches a
//! process-global random source, so tests can seed a generator and get
//! reproducible numbers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const DEFAULT_PREFIX: &str = "TRX";
const DEFAULT_RANDOM_LEN: usize = 9;

/// Generates human-readable contract numbers.
pub struct ContractNumberGenerator {
    prefix: String,
    random_len: usize,
    rng: Mutex<StdRng>,
}

impl ContractNumberGenerator {
    /// Generator with the standard `TRX` prefix and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Generator seeded for reproducible output. Test use only in spirit,
    /// but harmless in production.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            random_len: DEFAULT_RANDOM_LEN,
            rng: Mutex::new(rng),
        }
    }

    /// Override the prefix (e.g. per product line).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Produce one contract number.
    pub fn generate(&self) -> String {
        // A poisoned mutex only means another thread panicked mid-draw;
        // the RNG state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let mut number = String::with_capacity(self.prefix.len() + self.random_len);
        number.push_str(&self.prefix);
        for _ in 0..self.random_len {
            let idx = rng.gen_range(0..ALPHABET.len());
            number.push(ALPHABET[idx] as char);
        }
        number
    }
}

impl Default for ContractNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
