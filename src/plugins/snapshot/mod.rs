//! Frame snapshots for the renderer.
//!
//! The simulation publishes one immutable [`FrameSnapshot`] per fixed tick.
//! Readers clone the current `Arc` under a short read lock and then iterate it
//! with no lock held, so they can never observe a half-updated population, on
//! any thread.

use std::sync::{Arc, PoisonError, RwLock};

use bevy::prelude::*;

use crate::plugins::core::SimulationSet;
use crate::plugins::enemies::{EnemyId, EnemyManager, EnemyState};
use crate::plugins::player::{PlayerController, Prompt};
use crate::plugins::projectiles::{ProjectileId, ProjectileSystem};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerView {
    pub position: Vec2,
    pub aim: f32,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: Vec2,
    pub facing: f32,
    pub health: u32,
    pub state: EnemyState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub position: Vec2,
    pub angle: f32,
}

/// Everything a renderer needs for one frame. Positions are world pixels,
/// screen axes (y down).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub camera_offset: IVec2,
    pub viewport_size: UVec2,
    pub world_size: UVec2,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub roofs_visible: bool,
    pub prompt: Option<Prompt>,
}

impl FrameSnapshot {
    pub fn capture(
        tick: u64,
        controller: &PlayerController,
        enemies: &EnemyManager,
        projectiles: &ProjectileSystem,
    ) -> Self {
        let viewport = controller.viewport();
        let character = controller.character();
        let zones = controller.zone_status();

        Self {
            tick,
            camera_offset: viewport.offset(),
            viewport_size: viewport.size(),
            world_size: viewport.world(),
            player: PlayerView {
                position: character.position,
                aim: character.aim,
                health: character.health.current,
                max_health: character.health.max,
            },
            enemies: enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id(),
                    position: e.position(),
                    facing: e.facing(),
                    health: e.health(),
                    state: e.state(),
                })
                .collect(),
            projectiles: projectiles
                .active()
                .map(|p| ProjectileView {
                    id: p.id(),
                    position: p.position(),
                    angle: p.angle(),
                })
                .collect(),
            roofs_visible: zones.roofs_visible,
            prompt: zones.prompt.clone(),
        }
    }

    /// World point to viewport pixels.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera_offset.as_vec2()
    }

    /// World point scaled onto a minimap of `minimap_size` pixels.
    pub fn minimap_point(&self, world: Vec2, minimap_size: Vec2) -> Vec2 {
        let world_size = self.world_size.as_vec2().max(Vec2::ONE);
        (world / world_size).clamp(Vec2::ZERO, Vec2::ONE) * minimap_size
    }
}

/// Single-writer, many-reader hand-off of the latest snapshot.
#[derive(Resource, Debug, Clone, Default)]
pub struct SnapshotBus {
    latest: Arc<RwLock<Arc<FrameSnapshot>>>,
}

impl SnapshotBus {
    pub fn publish(&self, snapshot: FrameSnapshot) {
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(snapshot);
    }

    pub fn latest(&self) -> Arc<FrameSnapshot> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SnapshotBus>().add_systems(
        FixedUpdate,
        publish_snapshot.in_set(SimulationSet::Publish),
    );
}

pub(crate) fn publish_snapshot(
    mut tick: Local<u64>,
    bus: Res<SnapshotBus>,
    controller: Res<PlayerController>,
    enemies: Res<EnemyManager>,
    projectiles: Res<ProjectileSystem>,
) {
    *tick += 1;
    bus.publish(FrameSnapshot::capture(*tick, &controller, &enemies, &projectiles));
}
