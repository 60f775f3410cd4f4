//! Projectiles plugin.
//!
//! ```text
//! FixedUpdate
//!   SimulationSet::Player       drive_player       -> ProjectileSystem::fire
//!   SimulationSet::Enemies      resolve_projectile_hits (deactivates on hit)
//!   SimulationSet::Projectiles  advance_projectiles     (sub-steps, prunes)
//! ```
//!
//! Projectiles are plain data inside one resource rather than entities. The
//! renderer never touches them directly; it reads the published frame
//! snapshot.

pub mod system;

use bevy::prelude::*;

use crate::common::state::Cinematic;
use crate::common::tunables::Tunables;
use crate::plugins::core::SimulationSet;
use crate::plugins::world::CollisionField;

pub use system::{AdvanceReport, MAX_SUBSTEPS, Projectile, ProjectileId, ProjectileSystem};

pub fn plugin(app: &mut App) {
    let projectiles = ProjectileSystem::from_tunables(app.world().resource::<Tunables>());
    app.insert_resource(projectiles).add_systems(
        FixedUpdate,
        advance_projectiles.in_set(SimulationSet::Projectiles),
    );
}

pub(crate) fn advance_projectiles(
    cinematic: Res<Cinematic>,
    field: Res<CollisionField>,
    mut projectiles: ResMut<ProjectileSystem>,
) {
    if cinematic.active {
        return;
    }
    let report = projectiles.advance(&field);
    if report.impacts > 0 || report.expired > 0 {
        trace!(
            "projectiles: {} hit walls, {} expired, {} in flight",
            report.impacts,
            report.expired,
            projectiles.len()
        );
    }
}

#[cfg(test)]
mod tests;
