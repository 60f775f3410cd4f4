//! Render plugin (render-only).
//!
//! Mirrors the latest [`FrameSnapshot`] into sprites. The simulation uses
//! screen axes (y down); Bevy's 2D world is y up, so every position goes
//! through [`to_render`] and every angle is negated.
//!
//! ```text
//! OnEnter(InGame): backdrop (floor + obstacle mask image), roof overlays
//! Update:          sync_sprites   snapshot -> spawn / move / despawn sprites
//! ```

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{EnemyId, EnemyState};
use crate::plugins::player::ZoneKind;
use crate::plugins::projectiles::ProjectileId;
use crate::plugins::snapshot::{FrameSnapshot, SnapshotBus};
use crate::plugins::world::{CollisionField, ObstacleMask};

const Z_FLOOR: f32 = 0.0;
const Z_MASK: f32 = 1.0;
const Z_ACTORS: f32 = 5.0;
const Z_ROOFS: f32 = 8.0;

/// The backdrop image keeps one texel per `MASK_STRIDE` world pixels.
const MASK_STRIDE: u32 = 2;
const FLOOR_TILE: u32 = 128;

/// Simulation world point (y down) to a Bevy translation (y up).
pub fn to_render(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

/// Which simulated thing a sprite stands for.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorKey {
    Player,
    Enemy(EnemyId),
    Projectile(ProjectileId),
}

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct RoofOverlay;

#[derive(Resource, Default, Debug)]
struct Mirrored {
    sprites: HashMap<MirrorKey, Entity>,
    tick: Option<u64>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Mirrored>()
        .add_systems(OnEnter(GameState::InGame), (spawn_backdrop, spawn_roofs))
        .add_systems(Update, sync_sprites.run_if(in_state(GameState::InGame)));
}

fn spawn_backdrop(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    tunables: Res<Tunables>,
    field: Res<CollisionField>,
) {
    let world = tunables.world_size();
    let tiles_x = world.x.div_ceil(FLOOR_TILE);
    let tiles_y = world.y.div_ceil(FLOOR_TILE);

    (0..tiles_y)
        .flat_map(|y| (0..tiles_x).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let center = Vec2::new(
                (x * FLOOR_TILE) as f32 + FLOOR_TILE as f32 / 2.0,
                (y * FLOOR_TILE) as f32 + FLOOR_TILE as f32 / 2.0,
            );
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.10, 0.10, 0.12)
            } else {
                Color::srgb(0.08, 0.08, 0.10)
            };
            commands.spawn((
                Sprite::from_color(color, Vec2::splat(FLOOR_TILE as f32)),
                Transform::from_translation(to_render(center).extend(Z_FLOOR)),
                DespawnOnExit(GameState::InGame),
            ));
        });

    let Some(mask) = field.mask() else {
        return;
    };
    let size = Vec2::new(mask.width() as f32, mask.height() as f32);
    let handle = images.add(mask_image(mask));
    commands.spawn((
        Name::new("ObstacleBackdrop"),
        Sprite {
            image: handle,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(to_render(size / 2.0).extend(Z_MASK)),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Obstacles as opaque dark texels, everything else transparent.
fn mask_image(mask: &ObstacleMask) -> Image {
    let width = mask.width().div_ceil(MASK_STRIDE).max(1);
    let height = mask.height().div_ceil(MASK_STRIDE).max(1);

    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let solid = mask.is_obstacle(i64::from(x * MASK_STRIDE), i64::from(y * MASK_STRIDE));
            data.extend_from_slice(if solid { &[28, 26, 34, 255] } else { &[0, 0, 0, 0] });
        }
    }

    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    )
}

fn spawn_roofs(mut commands: Commands, tunables: Res<Tunables>) {
    for zone in tunables.zones.iter().filter(|z| z.kind == ZoneKind::Roof) {
        let r = zone.rect;
        let size = Vec2::new(r.width as f32, r.height as f32);
        let center = Vec2::new(r.x as f32, r.y as f32) + size / 2.0;
        commands.spawn((
            Name::new(format!("Roof:{}", zone.name)),
            RoofOverlay,
            Sprite::from_color(Color::srgb(0.22, 0.16, 0.14), size),
            Transform::from_translation(to_render(center).extend(Z_ROOFS)),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn sync_sprites(
    mut commands: Commands,
    bus: Res<SnapshotBus>,
    mut mirrored: ResMut<Mirrored>,
    mut q_sprites: Query<(&mut Transform, &mut Sprite), With<MirrorKey>>,
    mut q_roofs: Query<&mut Visibility, With<RoofOverlay>>,
) {
    let snap = bus.latest();
    if mirrored.tick == Some(snap.tick) {
        return;
    }
    mirrored.tick = Some(snap.tick);

    let roof_visibility = if snap.roofs_visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut vis in &mut q_roofs {
        *vis = roof_visibility;
    }

    let mut seen = Vec::with_capacity(1 + snap.enemies.len() + snap.projectiles.len());
    for (key, look) in looks(&snap) {
        seen.push(key);
        let transform = Transform::from_translation(to_render(look.position).extend(Z_ACTORS))
            .with_rotation(Quat::from_rotation_z(-look.angle));

        match mirrored.sprites.get(&key).copied() {
            Some(e) => {
                if let Ok((mut tf, mut sprite)) = q_sprites.get_mut(e) {
                    *tf = transform;
                    sprite.color = look.color;
                }
            }
            None => {
                let mut entity = commands.spawn((
                    key,
                    Sprite::from_color(look.color, look.size),
                    transform,
                    DespawnOnExit(GameState::InGame),
                ));
                if key == MirrorKey::Player {
                    entity.insert(PlayerSprite);
                }
                mirrored.sprites.insert(key, entity.id());
            }
        }
    }

    mirrored.sprites.retain(|key, entity| {
        let keep = seen.contains(key);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });
}

struct Look {
    position: Vec2,
    angle: f32,
    size: Vec2,
    color: Color,
}

fn looks(snap: &FrameSnapshot) -> impl Iterator<Item = (MirrorKey, Look)> + '_ {
    let player = std::iter::once((
        MirrorKey::Player,
        Look {
            position: snap.player.position,
            angle: snap.player.aim,
            size: Vec2::splat(20.0),
            color: Color::srgb(0.2, 0.75, 0.9),
        },
    ));
    let enemies = snap.enemies.iter().map(|e| {
        let color = match e.state {
            EnemyState::Wandering => Color::srgb(0.55, 0.2, 0.2),
            EnemyState::Pursuing => Color::srgb(0.9, 0.25, 0.2),
        };
        (
            MirrorKey::Enemy(e.id),
            Look {
                position: e.position,
                angle: e.facing,
                size: Vec2::splat(60.0),
                color,
            },
        )
    });
    let projectiles = snap.projectiles.iter().map(|p| {
        (
            MirrorKey::Projectile(p.id),
            Look {
                position: p.position,
                angle: p.angle,
                size: Vec2::new(10.0, 3.0),
                color: Color::srgb(1.0, 0.9, 0.4),
            },
        )
    });
    player.chain(enemies).chain(projectiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_space_flips_y() {
        assert_eq!(to_render(Vec2::new(3.0, 4.0)), Vec2::new(3.0, -4.0));
    }

    #[test]
    fn mask_image_is_downsampled() {
        let mut mask = ObstacleMask::open(5, 4);
        mask.fill_rect(0, 0, 1, 1);
        let image = mask_image(&mask);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
    }
}
