//! The enemy population.

use bevy::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use crate::common::tunables::Tunables;
use crate::plugins::audio::{SoundCue, SoundId};
use crate::plugins::player::PlayerHealth;
use crate::plugins::projectiles::ProjectileSystem;

use super::ai::{AlertCooldown, Effects, Enemy, EnemyId, EnemyTuning, HitOutcome, Surroundings};

/// Result of one projectile sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: usize,
    pub kills: usize,
}

/// Sole owner of every enemy, bounded by `capacity`.
#[derive(Resource, Debug)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    capacity: usize,
    spawn_points: Vec<Vec2>,
    tuning: EnemyTuning,
    alerts: AlertCooldown,
    next_id: u64,
    kills: u64,
}

impl EnemyManager {
    pub fn new(capacity: usize, spawn_points: Vec<Vec2>, tuning: EnemyTuning, alerts: AlertCooldown) -> Self {
        Self {
            enemies: Vec::with_capacity(capacity),
            capacity,
            spawn_points,
            tuning,
            alerts,
            next_id: 0,
            kills: 0,
        }
    }

    pub fn from_tunables(t: &Tunables) -> Self {
        Self::new(
            t.enemy_capacity,
            t.spawn_points(),
            EnemyTuning::from_tunables(t),
            AlertCooldown::new(t.alert_cooldown()),
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn kills(&self) -> u64 {
        self.kills
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_active())
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    /// True when no enemy is alive, including when the pool is empty.
    pub fn all_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_active())
    }

    /// Step every enemy, drop the dead and top the pool back up.
    ///
    /// Does nothing at all while a cinematic plays.
    pub fn update(
        &mut self,
        cinematic: bool,
        world: Surroundings<'_>,
        rng: &mut StdRng,
        player_health: &mut PlayerHealth,
        cues: &mut Vec<SoundCue>,
    ) {
        if cinematic {
            return;
        }

        let mut fx = Effects {
            rng: &mut *rng,
            player_health,
            alerts: &mut self.alerts,
            cues,
        };
        for enemy in &mut self.enemies {
            enemy.step(&self.tuning, world, &mut fx);
        }

        self.prune();
        self.replenish(rng);
    }

    /// Remove dead enemies. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(Enemy::is_active);
        before - self.enemies.len()
    }

    /// Spawn at random spawn points until the pool is full. Returns how many
    /// were spawned.
    pub fn replenish(&mut self, rng: &mut StdRng) -> usize {
        self.prune();
        let mut spawned = 0;
        while self.enemies.len() < self.capacity && !self.spawn_points.is_empty() {
            let at = self.spawn_points[rng.gen_range(0..self.spawn_points.len())];
            if self.spawn_at(at, rng).is_none() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    /// Add one enemy at `at`, unless the pool is full.
    pub fn spawn_at(&mut self, at: Vec2, rng: &mut StdRng) -> Option<EnemyId> {
        if self.enemies.len() >= self.capacity {
            return None;
        }
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::spawn(id, at, &self.tuning, rng));
        Some(id)
    }

    /// Test every live enemy against every live projectile.
    ///
    /// A hit costs the enemy one health and consumes the projectile. A dying
    /// enemy stops absorbing projectiles immediately.
    pub fn check_projectile_collisions(
        &mut self,
        projectiles: &mut ProjectileSystem,
        rng: &mut StdRng,
        cues: &mut Vec<SoundCue>,
    ) -> HitReport {
        let mut report = HitReport::default();
        let half_extent = self.tuning.half_extent;

        for enemy in self.enemies.iter_mut().filter(|e| e.is_active()) {
            for projectile in projectiles.active_mut() {
                if !enemy.contains(projectile.position(), half_extent) {
                    continue;
                }
                projectile.deactivate();
                report.hits += 1;

                if enemy.take_hit() == HitOutcome::Killed {
                    report.kills += 1;
                    self.kills += 1;
                    debug!("enemy {:?} killed at {}", enemy.id(), enemy.position());
                    if let Some(id) = SoundId::death(rng) {
                        cues.push(SoundCue::Play(id));
                    }
                    break;
                }
            }
        }
        report
    }
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self::from_tunables(&Tunables::default())
    }
}
