//! Feature plugins.
//!
//! Gameplay plugins read `Tunables` while they build, so `core` goes first.

use bevy::prelude::*;

pub mod audio;
pub mod core;
pub mod enemies;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod render;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    audio::plugin(app);
    world::plugin(app);
    player::plugin(app);
    projectiles::plugin(app);
    enemies::plugin(app);
    snapshot::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    render::plugin(app);
    lighting::plugin(app);
    camera::plugin(app);
}
