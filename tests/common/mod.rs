//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `noir_city::game::configure_headless` to install gameplay plugins.
//!
//! Fixed ticks are driven by hand with [`tick`] so tests do not depend on wall
//! clock time.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use noir_city::common::rng::SimRng;
use noir_city::plugins::world::CollisionField;

pub fn app_headless() -> App {
    app_with_field(CollisionField::walkable())
}

/// Headless app over a caller-provided collision field, with a seeded RNG.
pub fn app_with_field(field: CollisionField) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(field);

    noir_city::game::configure_headless(&mut app);
    app.insert_resource(SimRng::seeded(0x5eed));

    // Apply the initial state transition.
    app.update();
    app
}

/// Advance the fixed clock by one step and run one simulation tick.
pub fn tick(app: &mut App) {
    let step = app.world().resource::<Time<Fixed>>().timestep();
    app.world_mut().resource_mut::<Time<Fixed>>().advance_by(step);
    app.world_mut().run_schedule(FixedUpdate);
}

pub fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        tick(app);
    }
}
