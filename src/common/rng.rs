//! Shared random source for the simulation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Every randomized decision (wander targets, nudges, spawn choice, sound
/// variants) draws from this one generator so a seeded run is reproducible.
#[derive(Resource, Debug)]
pub struct SimRng(pub StdRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}
