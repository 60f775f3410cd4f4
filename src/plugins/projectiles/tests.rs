use bevy::prelude::*;

use super::{advance_projectiles, ProjectileSystem, MAX_SUBSTEPS};
use crate::common::state::Cinematic;
use crate::common::test_utils::run_system_once;
use crate::plugins::world::{CollisionField, ObstacleMask};

/// 200x200 field with a 5 px thick wall starting at x = 50.
fn walled_field() -> CollisionField {
    let mut mask = ObstacleMask::open(200, 200);
    mask.fill_rect(50, 0, 5, 200);
    CollisionField::new(mask)
}

#[test]
fn speed_30_step_5_samples_six_times() {
    let mut system = ProjectileSystem::new(30.0, 5.0, 6000.0);
    assert_eq!(system.substeps(), 6);

    system.fire(Vec2::new(10.0, 10.0), Vec2::new(10.0, 190.0));
    let report = system.advance(&CollisionField::walkable());
    assert_eq!(report.samples, 6);
    assert_eq!(report.impacts, 0);

    let p = system.active().next().unwrap();
    assert!((p.position() - Vec2::new(10.0, 40.0)).length() < 1e-4);
}

#[test]
fn uneven_division_rounds_substeps_up() {
    let system = ProjectileSystem::new(31.0, 5.0, 6000.0);
    assert_eq!(system.substeps(), 7);
}

#[test]
fn substeps_are_capped_for_tiny_steps() {
    let mut system = ProjectileSystem::new(30.0, 1e-6, 6000.0);
    assert_eq!(system.substeps(), MAX_SUBSTEPS);

    system.fire(Vec2::ZERO, Vec2::new(0.0, 100.0));
    let report = system.advance(&CollisionField::walkable());
    assert_eq!(report.samples, MAX_SUBSTEPS as usize);
    let p = system.active().next().unwrap();
    assert!((p.position().y - 30.0).abs() < 1e-2);
}

#[test]
fn stops_at_a_wall_fifty_units_away() {
    let field = walled_field();
    let mut system = ProjectileSystem::new(30.0, 5.0, 6000.0);
    let id = system.fire(Vec2::new(0.0, 100.0), Vec2::new(199.0, 100.0));

    let first = system.advance(&field);
    assert_eq!(first.impacts, 0);
    assert!(system.get(id).unwrap().position().x < 50.0);

    let second = system.advance(&field);
    assert_eq!(second.impacts, 1);
    assert_eq!(second.samples, 4);
    assert!(system.get(id).is_none(), "inactive projectiles are pruned");
    assert!(system.is_empty());
}

#[test]
fn never_moves_after_deactivation() {
    let mut system = ProjectileSystem::new(30.0, 5.0, 6000.0);
    let id = system.fire(Vec2::ZERO, Vec2::X);
    for p in system.active_mut() {
        p.deactivate();
    }

    let report = system.advance(&CollisionField::walkable());
    assert_eq!(report.samples, 0);
    assert!(system.get(id).is_none());
}

#[test]
fn zero_distance_shot_travels_up() {
    let mut system = ProjectileSystem::new(30.0, 5.0, 6000.0);
    system.fire(Vec2::new(500.0, 500.0), Vec2::new(500.0, 500.0));

    let p = system.active().next().unwrap();
    assert_eq!(p.direction(), Vec2::NEG_Y);
    assert!(p.direction().is_finite());
}

#[test]
fn range_cap_retires_projectiles() {
    let mut system = ProjectileSystem::new(30.0, 5.0, 90.0);
    system.fire(Vec2::ZERO, Vec2::X);

    let field = CollisionField::walkable();
    assert_eq!(system.advance(&field).expired, 0);
    assert_eq!(system.advance(&field).expired, 0);
    assert_eq!(system.advance(&field).expired, 1);
    assert!(system.is_empty());
}

#[test]
fn system_pauses_during_cinematic() {
    let mut world = World::new();
    let mut system = ProjectileSystem::new(30.0, 5.0, 6000.0);
    system.fire(Vec2::ZERO, Vec2::X);
    world.insert_resource(system);
    world.insert_resource(CollisionField::walkable());
    world.insert_resource(Cinematic { active: true });

    run_system_once(&mut world, advance_projectiles);
    let p = world.resource::<ProjectileSystem>().active().next().unwrap().position();
    assert_eq!(p, Vec2::ZERO);

    world.resource_mut::<Cinematic>().active = false;
    run_system_once(&mut world, advance_projectiles);
    let p = world.resource::<ProjectileSystem>().active().next().unwrap().position();
    assert!((p.x - 30.0).abs() < 1e-4);
}
