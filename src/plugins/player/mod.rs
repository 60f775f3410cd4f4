//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard and mouse into the `PlayerIntents` resource
//! - FixedUpdate (Player set): move, pan the camera, aim, fire, evaluate zones
//! - FixedUpdate (Settle set): report health changes, respawn a downed player
//!
//! Input devices are optional resources so the same systems run in headless
//! apps, where tests write `PlayerIntents` directly.

pub mod controller;
pub mod viewport;
pub mod zones;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::state::Cinematic;
use crate::common::tunables::Tunables;
use crate::plugins::audio::SoundCue;
use crate::plugins::core::SimulationSet;
use crate::plugins::projectiles::ProjectileSystem;
use crate::plugins::world::CollisionField;

pub use controller::{MovementIntents, PlayerController, PlayerHealth};
pub use zones::{Prompt, ZoneEvent, ZoneKind, ZoneSpec, ZoneStatus};

/// Decoded input, written every frame and consumed by the fixed tick.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PlayerIntents {
    pub movement: MovementIntents,
    /// Pointer in viewport pixels, `None` while it is outside the window.
    pub cursor: Option<Vec2>,
    /// Shots requested since the last tick.
    pub shots: u32,
}

/// HUD notification.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHealthChanged {
    pub health: u32,
    pub max: u32,
}

pub fn plugin(app: &mut App) {
    let controller = PlayerController::from_tunables(app.world().resource::<Tunables>());
    app.insert_resource(controller)
        .init_resource::<PlayerIntents>()
        .add_message::<PlayerHealthChanged>()
        .add_message::<ZoneEvent>()
        .add_systems(Update, gather_input)
        .add_systems(FixedUpdate, drive_player.in_set(SimulationSet::Player))
        .add_systems(FixedUpdate, settle_player_health.in_set(SimulationSet::Settle));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    controller: Res<PlayerController>,
    mut intents: ResMut<PlayerIntents>,
) {
    if let Some(keys) = keys {
        intents.movement = MovementIntents {
            up: keys.pressed(KeyCode::KeyW),
            down: keys.pressed(KeyCode::KeyS),
            left: keys.pressed(KeyCode::KeyA),
            right: keys.pressed(KeyCode::KeyD),
            run: keys.pressed(KeyCode::Space),
        };
    }

    if buttons.is_some_and(|b| b.just_pressed(MouseButton::Left)) {
        intents.shots += 1;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    intents.cursor = window
        .cursor_position()
        .filter(|_| window_size.min_element() > 0.0)
        .map(|c| c * controller.viewport().size().as_vec2() / window_size);
}

#[allow(clippy::too_many_arguments)]
fn drive_player(
    cinematic: Res<Cinematic>,
    tunables: Res<Tunables>,
    mut intents: ResMut<PlayerIntents>,
    mut controller: ResMut<PlayerController>,
    mut field: ResMut<CollisionField>,
    mut projectiles: ResMut<ProjectileSystem>,
    mut cues: MessageWriter<SoundCue>,
    mut zone_events: MessageWriter<ZoneEvent>,
) {
    if cinematic.active {
        intents.shots = 0;
        return;
    }

    let mut sounds = Vec::new();
    controller.step_movement(&intents.movement, &mut field, &mut sounds);

    if let Some(cursor) = intents.cursor {
        controller.aim_at(cursor);
    }
    for _ in 0..std::mem::take(&mut intents.shots) {
        controller.fire(&mut projectiles, &mut sounds);
    }

    let mut events = Vec::new();
    controller.evaluate_zones(&tunables.zones, &mut events, &mut sounds);

    cues.write_batch(sounds);
    zone_events.write_batch(events);
}

fn settle_player_health(
    mut reported: Local<Option<u32>>,
    mut controller: ResMut<PlayerController>,
    mut field: ResMut<CollisionField>,
    mut intents: ResMut<PlayerIntents>,
    mut health_events: MessageWriter<PlayerHealthChanged>,
    mut cues: MessageWriter<SoundCue>,
) {
    let health = controller.health();
    if *reported != Some(health.current) {
        health_events.write(PlayerHealthChanged {
            health: health.current,
            max: health.max,
        });
        *reported = Some(health.current);
    }

    if !health.is_down() {
        return;
    }

    info!("player down, back to the start");
    let mut sounds = Vec::new();
    controller.respawn(&mut field, &mut sounds);
    intents.movement = MovementIntents::default();
    intents.shots = 0;
    cues.write_batch(sounds);

    health_events.write(PlayerHealthChanged {
        health: health.max,
        max: health.max,
    });
    *reported = Some(health.max);
}
