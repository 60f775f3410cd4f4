mod common;

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use noir_city::plugins::audio::{SoundCue, SoundId};
use noir_city::plugins::enemies::ai::AlertCooldown;
use noir_city::plugins::enemies::{EnemyManager, EnemyTuning};
use noir_city::plugins::player::{PlayerController, PlayerHealthChanged, PlayerIntents};
use noir_city::plugins::projectiles::ProjectileSystem;
use noir_city::plugins::world::{CollisionField, ObstacleMask};

/// One enemy, always respawning at `spawn`.
fn lone_enemy(spawn: Vec2) -> EnemyManager {
    EnemyManager::new(
        1,
        vec![spawn],
        EnemyTuning::default(),
        AlertCooldown::new(Duration::from_secs(5)),
    )
}

fn player_position(app: &App) -> Vec2 {
    app.world().resource::<PlayerController>().character().position
}

#[test]
fn three_shots_kill_a_charging_enemy() {
    let mut app = common::app_headless();
    let player = player_position(&app);
    app.insert_resource(lone_enemy(player + Vec2::new(200.0, 0.0)));

    {
        let mut intents = app.world_mut().resource_mut::<PlayerIntents>();
        // Viewport center plus 200 px to the right.
        intents.cursor = Some(Vec2::new(840.0, 360.0));
    }

    for _ in 0..3 {
        app.world_mut().resource_mut::<PlayerIntents>().shots = 1;
        common::tick(&mut app);
    }
    common::ticks(&mut app, 12);

    let manager = app.world().resource::<EnemyManager>();
    assert_eq!(manager.kills(), 1);
    assert_eq!(manager.len(), 1, "wave refilled");
    assert!(app.world().resource::<ProjectileSystem>().is_empty());
    assert_eq!(app.world().resource::<PlayerController>().health().current, 4);

    let shots = app
        .world_mut()
        .resource_mut::<Messages<SoundCue>>()
        .drain()
        .filter(|c| *c == SoundCue::Play(SoundId::Shot))
        .count();
    assert_eq!(shots, 3);
}

#[test]
fn walls_stop_shots_before_the_enemy() {
    let mut mask = ObstacleMask::open(4472, 4816);
    // Wall between the player at (1280, 720) and the enemy.
    mask.fill_rect(1330, 600, 10, 240);
    let mut app = common::app_with_field(CollisionField::new(mask));
    let player = player_position(&app);
    app.insert_resource(lone_enemy(player + Vec2::new(300.0, 0.0)));

    app.world_mut().resource_mut::<PlayerIntents>().cursor = Some(Vec2::new(940.0, 360.0));
    app.world_mut().resource_mut::<PlayerIntents>().shots = 1;
    common::ticks(&mut app, 5);

    assert!(app.world().resource::<ProjectileSystem>().is_empty());
    assert_eq!(app.world().resource::<EnemyManager>().kills(), 0);
}

#[test]
fn sustained_contact_downs_and_respawns_the_player() {
    let mut app = common::app_headless();
    let player = player_position(&app);
    app.insert_resource(lone_enemy(player));

    // Spawn, then first contact.
    common::ticks(&mut app, 2);
    assert_eq!(app.world().resource::<PlayerController>().health().current, 3);

    // Not faster than once per second.
    common::ticks(&mut app, 50);
    assert_eq!(app.world().resource::<PlayerController>().health().current, 3);

    common::ticks(&mut app, 200);

    let reported: Vec<u32> = app
        .world_mut()
        .resource_mut::<Messages<PlayerHealthChanged>>()
        .drain()
        .map(|m| m.health)
        .collect();
    let down = reported.iter().position(|h| *h == 0).expect("player went down");
    assert_eq!(reported[down + 1], 4, "respawned at full health");
    assert_eq!(&reported[..down], &[4, 3, 2, 1]);
}
