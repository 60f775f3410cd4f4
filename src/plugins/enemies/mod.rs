//! Enemies plugin: a bounded population that wanders, gives chase and cuts.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED
//! ---------------------------
//! Enemies are not entities. `EnemyManager` is a resource that owns them in a
//! plain `Vec`, addressed by `EnemyId`. The behavior of one enemy lives in
//! `ai`; the pool rules (spawn, prune, replenish, projectile sweep) live in
//! `manager`. Systems here only borrow resources and hand them over.
//!
//! ---------------------------
//! ORDER WITHIN A TICK
//! ---------------------------
//! ```text
//! SimulationSet::Enemies
//!   update_enemies           step AI, contact damage, prune, replenish
//!   resolve_projectile_hits  enemy x projectile sweep, wave refill
//! ```
//!
//! ---------------------------
//! TIME MODEL
//! ---------------------------
//! Contact damage and the alert cooldown compare against `Time<Fixed>::elapsed`.
//! A cinematic freezes the population, and since the fixed clock keeps running
//! a contact that spans a cinematic ticks as soon as the cinematic ends.

pub mod ai;
pub mod manager;

use bevy::prelude::*;

use crate::common::rng::SimRng;
use crate::common::state::Cinematic;
use crate::common::tunables::Tunables;
use crate::plugins::audio::SoundCue;
use crate::plugins::core::SimulationSet;
use crate::plugins::player::PlayerController;
use crate::plugins::projectiles::ProjectileSystem;
use crate::plugins::world::CollisionField;

pub use ai::{Contact, Enemy, EnemyId, EnemyState, EnemyTuning, HitOutcome};
pub use manager::{EnemyManager, HitReport};

pub fn plugin(app: &mut App) {
    let manager = EnemyManager::from_tunables(app.world().resource::<Tunables>());
    app.insert_resource(manager).add_systems(
        FixedUpdate,
        (update_enemies, resolve_projectile_hits)
            .chain()
            .in_set(SimulationSet::Enemies),
    );
}

pub(crate) fn update_enemies(
    cinematic: Res<Cinematic>,
    time: Res<Time<Fixed>>,
    field: Res<CollisionField>,
    mut manager: ResMut<EnemyManager>,
    mut controller: ResMut<PlayerController>,
    mut rng: ResMut<SimRng>,
    mut cues: MessageWriter<SoundCue>,
) {
    let world = ai::Surroundings {
        player: controller.character().position,
        field: &field,
        now: time.elapsed(),
    };

    let mut sounds = Vec::new();
    manager.update(
        cinematic.active,
        world,
        &mut rng.0,
        controller.health_mut(),
        &mut sounds,
    );
    cues.write_batch(sounds);
}

pub(crate) fn resolve_projectile_hits(
    cinematic: Res<Cinematic>,
    mut manager: ResMut<EnemyManager>,
    mut projectiles: ResMut<ProjectileSystem>,
    mut rng: ResMut<SimRng>,
    mut cues: MessageWriter<SoundCue>,
) {
    if cinematic.active {
        return;
    }

    let mut sounds = Vec::new();
    let report = manager.check_projectile_collisions(&mut projectiles, &mut rng.0, &mut sounds);

    if report.kills > 0 && manager.all_dead() {
        let spawned = manager.replenish(&mut rng.0);
        info!("wave cleared after {} kills, {spawned} new enemies", manager.kills());
    }
    cues.write_batch(sounds);
}
