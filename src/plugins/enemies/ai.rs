//! Behavior of a single enemy.
//!
//! An enemy is plain data. [`Enemy::step`] runs one tick of its state machine
//! against a read-only view of the world ([`Surroundings`]) and writes its side
//! effects through [`Effects`]. Nothing here owns a timer or a callback; all
//! periodic behavior compares against the simulation clock.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;
use rand::rngs::StdRng;

use crate::common::tunables::Tunables;
use crate::plugins::audio::{SoundCue, SoundId};
use crate::plugins::player::PlayerHealth;
use crate::plugins::world::CollisionField;

/// Stable handle for an enemy. Never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnemyState {
    #[default]
    Wandering,
    Pursuing,
}

impl EnemyState {
    /// The state for an enemy `distance` away from the player.
    ///
    /// Pursuit starts strictly inside `pursuit_radius` and ends only once the
    /// distance exceeds it, so an enemy sitting on the boundary keeps its state.
    pub fn transition(self, distance: f32, pursuit_radius: f32) -> Self {
        match self {
            EnemyState::Wandering if distance < pursuit_radius => EnemyState::Pursuing,
            EnemyState::Pursuing if distance > pursuit_radius => EnemyState::Wandering,
            unchanged => unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Already within the arrival epsilon; nothing moved.
    Arrived,
    /// Took the straight step.
    Moved,
    /// Straight step was blocked; the random nudge got through.
    Nudged,
    /// Both the step and the nudge were blocked.
    Blocked,
}

impl MoveResult {
    pub fn failed(self) -> bool {
        self == MoveResult::Blocked
    }
}

/// Melee contact with the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Contact {
    #[default]
    Apart,
    /// In contact; the next damage tick is due at `next_tick`.
    Touching { next_tick: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The enemy was already dead.
    Ignored,
    Wounded { remaining: u32 },
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTuning {
    pub max_health: u32,
    pub half_extent: f32,
    pub wander_speed: f32,
    pub pursuit_speed: f32,
    pub pursuit_radius: f32,
    pub arrive_epsilon: f32,
    pub retarget_ticks: u32,
    pub stuck_limit: u32,
    pub contact_interval: Duration,
    /// Wander destinations are drawn from `[0, bounds)`.
    pub bounds: Vec2,
}

impl EnemyTuning {
    pub fn from_tunables(t: &Tunables) -> Self {
        Self {
            max_health: t.enemy_max_health,
            half_extent: t.enemy_half_extent,
            wander_speed: t.wander_speed,
            pursuit_speed: t.pursuit_speed,
            pursuit_radius: t.pursuit_radius,
            arrive_epsilon: t.arrive_epsilon,
            retarget_ticks: t.wander_retarget_ticks,
            stuck_limit: t.stuck_limit,
            contact_interval: t.contact_interval(),
            bounds: t.world_size().as_vec2(),
        }
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self::from_tunables(&Tunables::default())
    }
}

/// Minimum spacing between alert cries, shared by the whole population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCooldown {
    interval: Duration,
    last: Option<Duration>,
}

impl AlertCooldown {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn ready(&self, now: Duration) -> bool {
        self.last
            .is_none_or(|last| now.saturating_sub(last) >= self.interval)
    }

    /// Claim the cooldown at `now` if it has elapsed.
    pub fn try_claim(&mut self, now: Duration) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last = Some(now);
        true
    }
}

/// What an enemy can see this tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub player: Vec2,
    pub field: &'a CollisionField,
    pub now: Duration,
}

/// Everything an enemy may change besides itself.
pub struct Effects<'a> {
    pub rng: &'a mut StdRng,
    pub player_health: &'a mut PlayerHealth,
    pub alerts: &'a mut AlertCooldown,
    pub cues: &'a mut Vec<SoundCue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    position: Vec2,
    health: u32,
    state: EnemyState,
    wander_target: Vec2,
    retarget_in: u32,
    stuck: u32,
    facing: f32,
    contact: Contact,
    alerted: bool,
    active: bool,
}

impl Enemy {
    pub fn spawn(id: EnemyId, at: Vec2, tuning: &EnemyTuning, rng: &mut StdRng) -> Self {
        Self {
            id,
            position: at,
            health: tuning.max_health,
            state: EnemyState::Wandering,
            wander_target: random_target(tuning.bounds, rng),
            retarget_in: tuning.retarget_ticks,
            stuck: 0,
            facing: 0.0,
            contact: Contact::Apart,
            alerted: false,
            active: true,
        }
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn contact(&self) -> Contact {
        self.contact
    }

    pub fn wander_target(&self) -> Vec2 {
        self.wander_target
    }

    pub fn stuck_count(&self) -> u32 {
        self.stuck
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// One simulation tick.
    pub fn step(&mut self, tuning: &EnemyTuning, world: Surroundings<'_>, fx: &mut Effects<'_>) {
        if !self.active {
            return;
        }

        let distance = self.position.distance(world.player);
        let next = self.state.transition(distance, tuning.pursuit_radius);
        let entering_pursuit = next == EnemyState::Pursuing && self.state != EnemyState::Pursuing;
        if next == EnemyState::Wandering && self.state != EnemyState::Wandering {
            self.alerted = false;
        }
        self.state = next;

        match self.state {
            EnemyState::Pursuing => {
                self.move_toward(world.player, tuning.pursuit_speed, tuning, world.field, fx.rng);
                if entering_pursuit && !self.alerted {
                    self.alerted = true;
                    if fx.alerts.try_claim(world.now) {
                        fx.cues.push(SoundCue::Play(SoundId::alert(&mut *fx.rng)));
                    }
                }
            }
            EnemyState::Wandering => self.wander(tuning, world.field, fx.rng),
        }

        let distance = self.position.distance(world.player);
        self.update_contact(distance, tuning, world.now, fx);
    }

    fn wander(&mut self, tuning: &EnemyTuning, field: &CollisionField, rng: &mut StdRng) {
        if self.retarget_in == 0 || self.stuck >= tuning.stuck_limit {
            self.wander_target = random_target(tuning.bounds, rng);
            self.retarget_in = tuning.retarget_ticks;
            self.stuck = 0;
        }

        let result = self.move_toward(self.wander_target, tuning.wander_speed, tuning, field, rng);
        if result.failed() {
            self.stuck += 1;
        } else {
            self.stuck = 0;
        }
        self.retarget_in = self.retarget_in.saturating_sub(1);
    }

    /// Step towards `target` at `speed`, never overshooting it.
    ///
    /// A blocked step is retried once with a random nudge of up to `speed` on
    /// each axis.
    pub fn move_toward(
        &mut self,
        target: Vec2,
        speed: f32,
        tuning: &EnemyTuning,
        field: &CollisionField,
        rng: &mut StdRng,
    ) -> MoveResult {
        let delta = target - self.position;
        let distance = delta.length();
        if distance < tuning.arrive_epsilon || distance == 0.0 {
            return MoveResult::Arrived;
        }

        let candidate = self.position + delta / distance * speed.min(distance);
        if !field.occupied_world(candidate) {
            self.position = candidate;
            self.facing = delta.y.atan2(delta.x);
            return MoveResult::Moved;
        }

        let nudge = Vec2::new(rng.gen_range(-1..=1) as f32, rng.gen_range(-1..=1) as f32) * speed;
        let candidate = self.position + nudge;
        if !field.occupied_world(candidate) {
            self.position = candidate;
            return MoveResult::Nudged;
        }

        MoveResult::Blocked
    }

    /// Apply contact damage to the player if due.
    ///
    /// The first tick of a contact is immediate; further ticks follow every
    /// `contact_interval` while contact holds. Breaking contact drops any
    /// pending tick.
    pub fn update_contact(
        &mut self,
        distance: f32,
        tuning: &EnemyTuning,
        now: Duration,
        fx: &mut Effects<'_>,
    ) {
        let touching = self.active && distance <= tuning.half_extent;
        self.contact = match (self.contact, touching) {
            (_, false) => Contact::Apart,
            (Contact::Apart, true) => {
                deal_contact_damage(fx);
                Contact::Touching {
                    next_tick: now + tuning.contact_interval,
                }
            }
            (Contact::Touching { next_tick }, true) if now >= next_tick => {
                deal_contact_damage(fx);
                Contact::Touching {
                    next_tick: now + tuning.contact_interval,
                }
            }
            (touching @ Contact::Touching { .. }, true) => touching,
        };
    }

    /// Register one projectile hit.
    pub fn take_hit(&mut self) -> HitOutcome {
        if !self.active {
            return HitOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(1);
        if self.health > 0 {
            return HitOutcome::Wounded { remaining: self.health };
        }
        self.active = false;
        self.contact = Contact::Apart;
        HitOutcome::Killed
    }

    /// Box test of a point against the enemy's extent, edges included.
    pub fn contains(&self, point: Vec2, half_extent: f32) -> bool {
        let d = (point - self.position).abs();
        d.x <= half_extent && d.y <= half_extent
    }
}

fn deal_contact_damage(fx: &mut Effects<'_>) {
    if fx.player_health.is_down() {
        return;
    }
    let remaining = fx.player_health.take_hit(1);
    fx.cues.push(SoundCue::Play(SoundId::cut(&mut *fx.rng)));
    if remaining > 0 {
        fx.cues.push(SoundCue::Play(SoundId::pain(&mut *fx.rng)));
    }
}

fn random_target(bounds: Vec2, rng: &mut StdRng) -> Vec2 {
    let x = if bounds.x > 0.0 { rng.gen_range(0.0..bounds.x) } else { 0.0 };
    let y = if bounds.y > 0.0 { rng.gen_range(0.0..bounds.y) } else { 0.0 };
    Vec2::new(x, y)
}
