//! World plugin: the obstacle mask and the collision field sampled against it.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub mod mask;

pub use mask::ObstacleMask;

/// Point-in-obstacle queries against the world mask.
///
/// Queries take viewport coordinates and add the camera offset that the
/// player controller pushed for the current frame. A field without a mask (the
/// asset failed to load) answers "walkable" everywhere.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionField {
    mask: Option<ObstacleMask>,
    offset: IVec2,
}

impl CollisionField {
    pub fn new(mask: ObstacleMask) -> Self {
        Self {
            mask: Some(mask),
            offset: IVec2::ZERO,
        }
    }

    /// A field with no obstacles at all.
    pub fn walkable() -> Self {
        Self::default()
    }

    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    pub fn mask(&self) -> Option<&ObstacleMask> {
        self.mask.as_ref()
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Called once per tick by the camera owner, before any query that tick.
    pub fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset;
    }

    /// Sample the mask at `(x + ox, y + oy)`.
    pub fn occupied(&self, x: i64, y: i64) -> bool {
        let Some(mask) = &self.mask else {
            return false;
        };
        mask.is_obstacle(x + i64::from(self.offset.x), y + i64::from(self.offset.y))
    }

    /// Query a world-space point: convert it to viewport space with this tick's
    /// offset, then sample.
    pub fn occupied_world(&self, point: Vec2) -> bool {
        let x = point.x.floor() as i64 - i64::from(self.offset.x);
        let y = point.y.floor() as i64 - i64::from(self.offset.y);
        self.occupied(x, y)
    }
}

pub fn plugin(app: &mut App) {
    if app.world().contains_resource::<CollisionField>() {
        return;
    }
    let path = app.world().resource::<Tunables>().mask_path.clone();
    app.insert_resource(load_collision_field(&path));
}

/// Load the mask at `path`. A missing or undecodable mask is reported and
/// leaves the whole world walkable.
pub fn load_collision_field(path: &str) -> CollisionField {
    match ObstacleMask::load(path) {
        Ok(mask) => {
            info!("loaded obstacle mask {path} ({}x{})", mask.width(), mask.height());
            CollisionField::new(mask)
        }
        Err(e) => {
            warn!("obstacle mask unavailable, world is fully walkable: {e}");
            CollisionField::walkable()
        }
    }
}

#[cfg(test)]
mod tests;
