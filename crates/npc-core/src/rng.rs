//! Seeded randomness for damage rolls, cover choice, and spawn scatter.
//!
//! Every agent owns a `SmallRng` seeded from the run seed and its own id, so
//! one agent's rolls never shift another's and spawning more agents leaves
//! existing streams untouched.  Placement scatter draws from a separate
//! [`SimRng`] owned by the population manager.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Spreads consecutive agent ids across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG, created at spawn and owned by the agent.
#[derive(Clone, Debug)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let seed = run_seed ^ u64::from(agent.0).wrapping_mul(SEED_SPREAD);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.0.r#gen()
    }

    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }
}

/// Population-level RNG.  Only the tick loop's owner touches it.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }
}
