//! Tunable gameplay constants.
//!
//! The defaults describe the district map the game ships with. A RON file may
//! override any subset of fields; missing fields keep their default.

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::plugins::projectiles::MAX_SUBSTEPS;
use crate::plugins::player::zones::{default_zones, ZoneSpec};

/// Where the game looks for overrides, relative to the working directory.
pub const TUNABLES_PATH: &str = "assets/tunables.ron";

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tunables {
    pub world_width: u32,
    pub world_height: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub camera_start: (i32, i32),
    pub mask_path: String,

    pub walk_speed: f32,
    pub run_speed: f32,
    pub player_half_extent: f32,
    pub player_max_health: u32,

    pub projectile_speed: f32,
    pub projectile_step: f32,
    pub projectile_max_range: f32,

    pub enemy_capacity: usize,
    pub enemy_max_health: u32,
    pub enemy_half_extent: f32,
    pub wander_speed: f32,
    pub pursuit_speed: f32,
    pub pursuit_radius: f32,
    pub arrive_epsilon: f32,
    pub wander_retarget_ticks: u32,
    pub stuck_limit: u32,
    pub alert_cooldown_secs: f32,
    pub contact_interval_secs: f32,
    pub spawn_points: Vec<(f32, f32)>,

    pub light_radius: f32,
    pub zones: Vec<ZoneSpec>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            world_width: 4472,
            world_height: 4816,
            viewport_width: 1280,
            viewport_height: 720,
            camera_start: (640, 360),
            mask_path: "assets/collision_mask.png".into(),

            walk_speed: 3.0,
            run_speed: 5.0,
            player_half_extent: 10.0,
            player_max_health: 4,

            projectile_speed: 30.0,
            projectile_step: 5.0,
            projectile_max_range: 6000.0,

            enemy_capacity: 20,
            enemy_max_health: 3,
            enemy_half_extent: 30.0,
            wander_speed: 1.0,
            pursuit_speed: 4.0,
            pursuit_radius: 250.0,
            arrive_epsilon: 2.0,
            wander_retarget_ticks: 200,
            stuck_limit: 5,
            alert_cooldown_secs: 5.0,
            contact_interval_secs: 1.0,
            spawn_points: vec![(750.0, 420.0), (3350.0, 679.0), (840.0, 4285.0), (3436.0, 3560.0)],

            light_radius: 150.0,
            zones: default_zones(),
        }
    }
}

impl Tunables {
    pub fn world_size(&self) -> UVec2 {
        UVec2::new(self.world_width, self.world_height)
    }

    pub fn viewport_size(&self) -> UVec2 {
        UVec2::new(self.viewport_width, self.viewport_height)
    }

    pub fn camera_start(&self) -> IVec2 {
        IVec2::new(self.camera_start.0, self.camera_start.1)
    }

    pub fn spawn_points(&self) -> Vec<Vec2> {
        self.spawn_points.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_secs_f32(self.alert_cooldown_secs.max(0.0))
    }

    pub fn contact_interval(&self) -> Duration {
        Duration::from_secs_f32(self.contact_interval_secs.max(0.0))
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let tunables: Self = ron::from_str(source)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Load overrides if the file exists; defaults otherwise.
    ///
    /// A file that exists but does not parse or validate is reported and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no tunables at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(tunables) => {
                info!("loaded tunables from {}", path.display());
                tunables
            }
            Err(e) => {
                warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.world_width < self.viewport_width || self.world_height < self.viewport_height {
            return invalid(format!(
                "world {}x{} is smaller than viewport {}x{}",
                self.world_width, self.world_height, self.viewport_width, self.viewport_height
            ));
        }
        if self.projectile_step.is_nan() || self.projectile_step <= 0.0 {
            return invalid(format!("projectile_step must be positive, got {}", self.projectile_step));
        }
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("projectile_speed", self.projectile_speed),
            ("wander_speed", self.wander_speed),
            ("pursuit_speed", self.pursuit_speed),
            ("player_half_extent", self.player_half_extent),
            ("enemy_half_extent", self.enemy_half_extent),
            ("arrive_epsilon", self.arrive_epsilon),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return invalid(format!("{name} must not be negative, got {value}"));
        }
        let substeps = (self.projectile_speed / self.projectile_step).ceil();
        if substeps > MAX_SUBSTEPS as f32 {
            return invalid(format!(
                "projectile_speed {} over projectile_step {} needs {substeps} samples per tick, limit is {MAX_SUBSTEPS}",
                self.projectile_speed, self.projectile_step
            ));
        }
        if self.spawn_points.is_empty() && self.enemy_capacity > 0 {
            return invalid("enemy_capacity is set but no spawn_points are defined".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        assert!(Tunables::default().validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let t = Tunables::from_ron_str("(walk_speed: 2.5, enemy_capacity: 15)").unwrap();
        assert_eq!(t.walk_speed, 2.5);
        assert_eq!(t.enemy_capacity, 15);
        assert_eq!(t.run_speed, 5.0);
        assert_eq!(t.spawn_points.len(), 4);
    }

    #[test]
    fn rejects_world_smaller_than_viewport() {
        let err = Tunables::from_ron_str("(world_width: 100)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = Tunables::from_ron_str("(projectile_step: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_tiny_step_for_fast_projectiles() {
        let err = Tunables::from_ron_str("(projectile_speed: 30.0, projectile_step: 0.0001)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let t = Tunables::from_ron_str("(projectile_speed: 30.0, projectile_step: 0.05)").unwrap();
        assert_eq!(t.projectile_step, 0.05);
    }

    #[test]
    fn rejects_negative_extents_and_nan() {
        for source in [
            "(enemy_half_extent: -1.0)",
            "(player_half_extent: -0.5)",
            "(arrive_epsilon: -2.0)",
        ] {
            let err = Tunables::from_ron_str(source).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{source}");
        }

        let t = Tunables {
            walk_speed: f32::NAN,
            ..Tunables::default()
        };
        assert!(matches!(t.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(walk_speed: ").unwrap();

        assert!(matches!(Tunables::load(file.path()), Err(ConfigError::Parse(_))));
        let t = Tunables::load_or_default(file.path());
        assert_eq!(t.walk_speed, 3.0);
    }

    #[test]
    fn missing_file_is_defaults() {
        let t = Tunables::load_or_default("does/not/exist.ron");
        assert_eq!(t.world_size(), UVec2::new(4472, 4816));
    }
}
