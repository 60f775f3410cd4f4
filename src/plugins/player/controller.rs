//! Player movement, camera and aim.
//!
//! Screen axes are used throughout the simulation: +x is right, +y is down.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::audio::{SoundCue, SoundId};
use crate::plugins::projectiles::{ProjectileId, ProjectileSystem};
use crate::plugins::world::CollisionField;

use super::viewport::Viewport;
use super::zones::{ZoneEvent, ZoneSpec, ZoneStatus, ZoneTracker};

/// Orthogonal movement flags. Any combination is legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementIntents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl MovementIntents {
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Directions in which an obstacle sits within reach of the character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedAxes {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl BlockedAxes {
    /// Probe one point per direction, `reach` away from `center`.
    pub fn probe(field: &CollisionField, center: Vec2, reach: f32) -> Self {
        Self {
            up: field.occupied_world(center + Vec2::new(0.0, -reach)),
            down: field.occupied_world(center + Vec2::new(0.0, reach)),
            left: field.occupied_world(center + Vec2::new(-reach, 0.0)),
            right: field.occupied_world(center + Vec2::new(reach, 0.0)),
        }
    }
}

/// Turn intents into this tick's displacement.
///
/// Blocked directions contribute nothing. A diagonal is rescaled so its length
/// is `speed`.
pub fn resolve_motion(intents: &MovementIntents, blocked: &BlockedAxes, speed: f32) -> Vec2 {
    let mut motion = Vec2::ZERO;
    if intents.up && !blocked.up {
        motion.y -= speed;
    }
    if intents.down && !blocked.down {
        motion.y += speed;
    }
    if intents.left && !blocked.left {
        motion.x -= speed;
    }
    if intents.right && !blocked.right {
        motion.x += speed;
    }

    let length = motion.length();
    if motion.x != 0.0 && motion.y != 0.0 && length > 0.0 {
        motion = motion / length * speed;
    }
    motion
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerHealth {
    pub current: u32,
    pub max: u32,
}

impl PlayerHealth {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Remove `amount`, stopping at zero. Returns what is left.
    pub fn take_hit(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    pub fn is_down(&self) -> bool {
        self.current == 0
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub position: Vec2,
    /// Radians, screen axes, measured from +x towards +y.
    pub aim: f32,
    /// World point the pointer was last seen over.
    pub pointer: Vec2,
    pub health: PlayerHealth,
    pub half_extent: f32,
}

/// Which footstep loop is playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Footsteps {
    #[default]
    Still,
    Walking,
    Running,
}

impl Footsteps {
    pub fn for_motion(motion: Vec2, running: bool) -> Self {
        match (motion != Vec2::ZERO, running) {
            (false, _) => Footsteps::Still,
            (true, false) => Footsteps::Walking,
            (true, true) => Footsteps::Running,
        }
    }

    fn loop_sound(self) -> Option<SoundId> {
        match self {
            Footsteps::Still => None,
            Footsteps::Walking => Some(SoundId::WalkLoop),
            Footsteps::Running => Some(SoundId::RunLoop),
        }
    }
}

#[derive(Resource, Debug)]
pub struct PlayerController {
    viewport: Viewport,
    character: Character,
    camera_start: IVec2,
    walk_speed: f32,
    run_speed: f32,
    footsteps: Footsteps,
    zones: ZoneTracker,
}

impl PlayerController {
    pub fn from_tunables(t: &Tunables) -> Self {
        let viewport = Viewport::new(t.camera_start(), t.viewport_size(), t.world_size());
        let position = viewport.character_position();
        Self {
            viewport,
            character: Character {
                position,
                aim: 0.0,
                pointer: position,
                health: PlayerHealth::full(t.player_max_health),
                half_extent: t.player_half_extent,
            },
            camera_start: t.camera_start(),
            walk_speed: t.walk_speed,
            run_speed: t.run_speed,
            footsteps: Footsteps::Still,
            zones: ZoneTracker::default(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn health(&self) -> PlayerHealth {
        self.character.health
    }

    pub fn health_mut(&mut self) -> &mut PlayerHealth {
        &mut self.character.health
    }

    pub fn footsteps(&self) -> Footsteps {
        self.footsteps
    }

    pub fn zone_status(&self) -> &ZoneStatus {
        self.zones.status()
    }

    /// Called once the clue viewer has shown `name`.
    pub fn mark_clue_seen(&mut self, name: &str) {
        self.zones.mark_clue_seen(name);
    }

    pub fn speed_for(&self, intents: &MovementIntents) -> f32 {
        if intents.run { self.run_speed } else { self.walk_speed }
    }

    /// Put the character at `world`, moving the camera with it.
    pub fn teleport(&mut self, world: Vec2, field: &mut CollisionField) {
        self.viewport.center_on(world);
        self.character.position = self.viewport.character_position();
        self.sync_offset(field);
    }

    /// One movement tick: probe, resolve, pan, re-derive the character.
    ///
    /// Returns the displacement applied to the camera before clamping.
    pub fn step_movement(
        &mut self,
        intents: &MovementIntents,
        field: &mut CollisionField,
        cues: &mut Vec<SoundCue>,
    ) -> Vec2 {
        self.sync_offset(field);

        let speed = self.speed_for(intents);
        let blocked = BlockedAxes::probe(field, self.character.position, self.character.half_extent + speed);
        let motion = resolve_motion(intents, &blocked, speed);

        if self.viewport.pan(motion) {
            self.sync_offset(field);
        }
        self.character.position = self.viewport.character_position();

        self.set_footsteps(Footsteps::for_motion(motion, intents.run), cues);
        motion
    }

    /// Point the character at a position given in viewport pixels.
    pub fn aim_at(&mut self, cursor: Vec2) {
        self.character.pointer = self.viewport.viewport_to_world(cursor);
        let delta = self.character.pointer - self.character.position;
        self.character.aim = delta.y.atan2(delta.x);
    }

    /// Shoot from the character towards the last aimed-at point.
    pub fn fire(&self, projectiles: &mut ProjectileSystem, cues: &mut Vec<SoundCue>) -> ProjectileId {
        cues.push(SoundCue::Play(SoundId::Shot));
        projectiles.fire(self.character.position, self.character.pointer)
    }

    pub fn evaluate_zones(
        &mut self,
        zones: &[ZoneSpec],
        events: &mut Vec<ZoneEvent>,
        cues: &mut Vec<SoundCue>,
    ) {
        self.zones.evaluate(zones, self.character.position, events, cues);
    }

    /// Back to the start with full health.
    pub fn respawn(&mut self, field: &mut CollisionField, cues: &mut Vec<SoundCue>) {
        self.character.health.restore();
        self.viewport.reset(self.camera_start);
        self.character.position = self.viewport.character_position();
        self.character.pointer = self.character.position;
        self.set_footsteps(Footsteps::Still, cues);
        self.zones.reset();
        self.sync_offset(field);
    }

    fn set_footsteps(&mut self, next: Footsteps, cues: &mut Vec<SoundCue>) {
        if next == self.footsteps {
            return;
        }
        if let Some(id) = self.footsteps.loop_sound() {
            cues.push(SoundCue::StopLoop(id));
        }
        if let Some(id) = next.loop_sound() {
            cues.push(SoundCue::StartLoop(id));
        }
        self.footsteps = next;
    }

    fn sync_offset(&self, field: &mut CollisionField) {
        let offset = self.viewport.offset();
        if field.offset() != offset {
            field.set_offset(offset);
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::from_tunables(&Tunables::default())
    }
}
