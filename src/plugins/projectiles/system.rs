//! Projectile storage and sub-stepped motion.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::world::CollisionField;

/// Upper bound on collision samples per projectile per advance.
pub const MAX_SUBSTEPS: u32 = 1000;

/// Stable handle for a projectile. Never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    id: ProjectileId,
    position: Vec2,
    direction: Vec2,
    speed: f32,
    travelled: f32,
    active: bool,
}

impl Projectile {
    pub fn id(&self) -> ProjectileId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Unit vector, fixed at creation.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn angle(&self) -> f32 {
        self.direction.y.atan2(self.direction.x)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// What one [`ProjectileSystem::advance`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Collision samples taken across all projectiles.
    pub samples: usize,
    /// Projectiles stopped by an obstacle.
    pub impacts: usize,
    /// Projectiles retired for exceeding their range.
    pub expired: usize,
}

/// Owns every live projectile.
///
/// Inactive projectiles are dropped at the end of each advance, so iteration
/// after an advance only ever yields projectiles that are still flying.
#[derive(Resource, Debug, Clone)]
pub struct ProjectileSystem {
    projectiles: Vec<Projectile>,
    next_id: u64,
    speed: f32,
    step: f32,
    max_range: f32,
}

impl ProjectileSystem {
    pub fn new(speed: f32, step: f32, max_range: f32) -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 0,
            speed,
            step,
            max_range,
        }
    }

    pub fn from_tunables(t: &Tunables) -> Self {
        Self::new(t.projectile_speed, t.projectile_step, t.projectile_max_range)
    }

    /// Collision samples each projectile takes per advance, at most
    /// [`MAX_SUBSTEPS`].
    pub fn substeps(&self) -> u32 {
        if self.step > 0.0 {
            ((self.speed / self.step).ceil() as u32).min(MAX_SUBSTEPS)
        } else {
            0
        }
    }

    /// Launch a projectile from `origin` towards `target`.
    ///
    /// A target on top of the origin has no direction; such shots travel
    /// straight up the screen.
    pub fn fire(&mut self, origin: Vec2, target: Vec2) -> ProjectileId {
        let direction = (target - origin).try_normalize().unwrap_or(Vec2::NEG_Y);

        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.projectiles.push(Projectile {
            id,
            position: origin,
            direction,
            speed: self.speed,
            travelled: 0.0,
            active: true,
        });
        id
    }

    /// Move every active projectile one frame, sampling `field` after each
    /// sub-step. A projectile stops on the first obstacle it samples.
    pub fn advance(&mut self, field: &CollisionField) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let substeps = self.substeps();

        for p in self.projectiles.iter_mut().filter(|p| p.active) {
            let stride = p.speed / substeps.max(1) as f32;
            for _ in 0..substeps {
                p.position += p.direction * stride;
                p.travelled += stride;
                report.samples += 1;
                if field.occupied_world(p.position) {
                    p.active = false;
                    report.impacts += 1;
                    break;
                }
            }
            if p.active && p.travelled >= self.max_range {
                p.active = false;
                report.expired += 1;
            }
        }

        self.prune();
        report
    }

    /// Drop inactive projectiles. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.active);
        before - self.projectiles.len()
    }

    pub fn active(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut().filter(|p| p.active)
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::from_tunables(&Tunables::default())
    }
}
