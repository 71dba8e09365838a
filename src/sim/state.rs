//! Rain simulation state
//!
//! Owns the live rings and the seeded RNG that spawns them.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::config::{ConfigError, RainConfig};
use super::ring::Ring;

/// Complete rain state (deterministic for a given seed and viewport sequence)
#[derive(Debug, Clone)]
pub struct RainState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Spawn and growth tuning
    pub config: RainConfig,
    /// Live rings in spawn order
    rings: Vec<Ring>,
    rng: Pcg32,
}

impl RainState {
    /// Create an empty rain with the given seed
    pub fn new(seed: u64, config: RainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            seed,
            time_ticks: 0,
            rings: Vec::with_capacity(config.capacity),
            rng: Pcg32::seed_from_u64(seed),
            config,
        })
    }

    /// Live rings in spawn order
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn live_count(&self) -> usize {
        self.rings.len()
    }

    pub fn is_full(&self) -> bool {
        self.rings.len() >= self.config.capacity
    }

    /// Insert a ring directly. Refused (returns `false`) when full.
    pub fn push_ring(&mut self, ring: Ring) -> bool {
        if self.is_full() {
            return false;
        }
        self.rings.push(ring);
        true
    }

    pub(super) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(super) fn rings_mut(&mut self) -> &mut Vec<Ring> {
        &mut self.rings
    }
}
