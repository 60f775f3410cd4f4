//! Core plugin: shared resources, the fixed clock and the tick ordering.

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::state::{Cinematic, GameState};
use crate::common::tunables::Tunables;

/// Simulation rate in ticks per second.
pub const TICK_HZ: f64 = 60.0;

/// Ordered phases of one fixed tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Movement, camera, aim, firing, zones.
    Player,
    /// Enemy AI, contact damage and projectile hits.
    Enemies,
    /// Projectile motion against the mask.
    Projectiles,
    /// Consequences of the tick (player down, HUD notifications).
    Settle,
    /// Hand the finished frame to readers.
    Publish,
}

pub fn plugin(app: &mut App) {
    // Callers may have inserted loaded tunables already.
    app.init_resource::<Tunables>()
        .init_resource::<SimRng>()
        .init_resource::<Cinematic>()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.03)))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .configure_sets(
            FixedUpdate,
            (
                SimulationSet::Player,
                SimulationSet::Enemies,
                SimulationSet::Projectiles,
                SimulationSet::Settle,
                SimulationSet::Publish,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}
