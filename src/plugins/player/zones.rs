//! Proximity zones around the player.
//!
//! Zones are plain world rectangles. The tracker only reports transitions and
//! the state the renderer needs; prompts, minigames and clue viewers live
//! outside the simulation.

use std::collections::HashSet;

use bevy::prelude::*;
use serde::Deserialize;

use crate::plugins::audio::{SoundCue, SoundId};

/// Axis-aligned world rectangle, half-open on the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorldRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WorldRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Tests the pixel the point falls in.
    pub fn contains(&self, point: Vec2) -> bool {
        let px = point.x.floor() as i64;
        let py = point.y.floor() as i64;
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && px < x + i64::from(self.width) && py >= y && py < y + i64::from(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ZoneKind {
    /// Roofs are hidden while the player stands inside.
    Roof,
    /// Offers the safe-cracking minigame.
    Safe,
    /// Sounds the area alarm once per entry.
    Alarm,
    /// Offers a clue with the given name until it has been seen.
    Clue(String),
    /// The way out of the district.
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneSpec {
    pub name: String,
    pub kind: ZoneKind,
    pub rect: WorldRect,
}

impl ZoneSpec {
    pub fn new(name: &str, kind: ZoneKind, rect: WorldRect) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            rect,
        }
    }
}

/// Zones of the district map.
pub fn default_zones() -> Vec<ZoneSpec> {
    vec![
        ZoneSpec::new("house_north", ZoneKind::Roof, WorldRect::new(1787, 1865, 463, 756)),
        ZoneSpec::new("house_south", ZoneKind::Roof, WorldRect::new(2567, 2785, 516, 1084)),
        ZoneSpec::new("safe", ZoneKind::Safe, WorldRect::new(2713, 3809, 3, 49)),
        ZoneSpec::new("warehouse_alarm", ZoneKind::Alarm, WorldRect::new(2499, 1854, 1301, 2588)),
        ZoneSpec::new("clue_76", ZoneKind::Clue("76".into()), WorldRect::new(1930, 3125, 198, 129)),
        ZoneSpec::new("clue_190", ZoneKind::Clue("190".into()), WorldRect::new(2823, 1283, 251, 228)),
        ZoneSpec::new("clue_35", ZoneKind::Clue("35".into()), WorldRect::new(2670, 3079, 230, 120)),
        ZoneSpec::new("escape", ZoneKind::Escape, WorldRect::new(1120, 1800, 50, 120)),
    ]
}

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum ZoneEvent {
    Entered { name: String, kind: ZoneKind },
    Exited { name: String, kind: ZoneKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    OpenSafe,
    InspectClue(String),
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStatus {
    pub roofs_visible: bool,
    pub prompt: Option<Prompt>,
}

impl Default for ZoneStatus {
    fn default() -> Self {
        Self {
            roofs_visible: true,
            prompt: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ZoneTracker {
    inside: Vec<bool>,
    seen_clues: HashSet<String>,
    status: ZoneStatus,
}

impl ZoneTracker {
    pub fn status(&self) -> &ZoneStatus {
        &self.status
    }

    /// Stop offering the clue `name`. Survives [`ZoneTracker::reset`].
    pub fn mark_clue_seen(&mut self, name: &str) {
        self.seen_clues.insert(name.to_owned());
    }

    pub fn clue_seen(&self, name: &str) -> bool {
        self.seen_clues.contains(name)
    }

    /// Forget every membership, as after a respawn. The next evaluation
    /// re-reports entries.
    pub fn reset(&mut self) {
        self.inside.clear();
        self.status = ZoneStatus::default();
    }

    pub fn evaluate(
        &mut self,
        zones: &[ZoneSpec],
        position: Vec2,
        events: &mut Vec<ZoneEvent>,
        cues: &mut Vec<SoundCue>,
    ) -> &ZoneStatus {
        self.inside.resize(zones.len(), false);

        let mut status = ZoneStatus::default();
        let seen = &self.seen_clues;
        for (zone, was_inside) in zones.iter().zip(self.inside.iter_mut()) {
            let inside = zone.rect.contains(position);

            if inside && !*was_inside {
                debug!("entered zone {}", zone.name);
                match &zone.kind {
                    ZoneKind::Alarm => cues.push(SoundCue::Play(SoundId::AreaAlarm)),
                    ZoneKind::Clue(name) if !seen.contains(name) => {
                        cues.push(SoundCue::Play(SoundId::Clue));
                    }
                    ZoneKind::Clue(_) | ZoneKind::Roof | ZoneKind::Safe | ZoneKind::Escape => {}
                }
                events.push(ZoneEvent::Entered {
                    name: zone.name.clone(),
                    kind: zone.kind.clone(),
                });
            } else if !inside && *was_inside {
                debug!("left zone {}", zone.name);
                events.push(ZoneEvent::Exited {
                    name: zone.name.clone(),
                    kind: zone.kind.clone(),
                });
            }
            *was_inside = inside;

            if !inside {
                continue;
            }
            match &zone.kind {
                ZoneKind::Roof => status.roofs_visible = false,
                ZoneKind::Safe => {
                    status.prompt.get_or_insert(Prompt::OpenSafe);
                }
                ZoneKind::Clue(name) if !seen.contains(name) => {
                    status.prompt.get_or_insert_with(|| Prompt::InspectClue(name.clone()));
                }
                ZoneKind::Escape => {
                    status.prompt.get_or_insert(Prompt::Escape);
                }
                ZoneKind::Clue(_) | ZoneKind::Alarm => {}
            }
        }

        self.status = status;
        &self.status
    }
}
