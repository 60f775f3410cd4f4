//! Camera plugin (render-only).
//!
//! The simulation owns the camera: its offset is part of every published
//! snapshot. This plugin only places the Bevy camera over the viewport
//! center, snapped to the same integer offset the collision queries used.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_viewport (before transform propagation)
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::render::to_render;
use crate::plugins::snapshot::SnapshotBus;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_viewport
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_viewport(bus: Res<SnapshotBus>, mut q_cam: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut tf) = q_cam.single_mut() else {
        return;
    };
    let snap = bus.latest();
    let center = snap.camera_offset.as_vec2() + snap.viewport_size.as_vec2() / 2.0;
    let target = to_render(center);
    tf.translation.x = target.x;
    tf.translation.y = target.y;
}
