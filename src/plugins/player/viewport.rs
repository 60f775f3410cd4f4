//! The camera over the world.
//!
//! The viewport keeps its top-left corner with sub-pixel precision so that
//! normalized diagonal steps do not lose length to rounding. Everything that
//! samples the mask sees the floored integer offset.

use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    position: Vec2,
    size: UVec2,
    world: UVec2,
}

impl Viewport {
    pub fn new(start: IVec2, size: UVec2, world: UVec2) -> Self {
        let mut viewport = Self {
            position: Vec2::ZERO,
            size,
            world,
        };
        viewport.reset(start);
        viewport
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn world(&self) -> UVec2 {
        self.world
    }

    /// Largest legal offset per axis.
    pub fn max_offset(&self) -> Vec2 {
        (self.world.as_vec2() - self.size.as_vec2()).max(Vec2::ZERO)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn offset(&self) -> IVec2 {
        self.position.floor().as_ivec2()
    }

    pub fn center(&self) -> Vec2 {
        self.size.as_vec2() / 2.0
    }

    /// The character always stands at the viewport center.
    pub fn character_position(&self) -> Vec2 {
        self.position + self.center()
    }

    /// Move by `delta`, clamping each axis on its own. Returns whether the
    /// integer offset changed.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        let before = self.offset();
        self.position = (self.position + delta).clamp(Vec2::ZERO, self.max_offset());
        self.offset() != before
    }

    pub fn reset(&mut self, start: IVec2) {
        self.position = start.as_vec2().clamp(Vec2::ZERO, self.max_offset());
    }

    /// Place the viewport so that `world` sits at its center, clamped.
    pub fn center_on(&mut self, world: Vec2) {
        self.position = (world - self.center()).clamp(Vec2::ZERO, self.max_offset());
    }

    pub fn viewport_to_world(&self, point: Vec2) -> Vec2 {
        point + self.position
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn start_is_clamped() {
        let vp = Viewport::new(IVec2::new(-50, 99_999), UVec2::new(100, 50), UVec2::new(300, 200));
        assert_eq!(vp.offset(), IVec2::new(0, 150));
    }

    #[test]
    fn offset_stays_in_bounds_under_random_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        for (world, size) in [(UVec2::new(4472, 4816), UVec2::new(1280, 720)), (UVec2::new(640, 480), UVec2::new(640, 480))] {
            let mut vp = Viewport::new(IVec2::new(640, 360), size, world);
            let max = (world - size).as_ivec2();
            for _ in 0..2000 {
                let delta = Vec2::new(rng.gen_range(-400.0..400.0), rng.gen_range(-400.0..400.0));
                vp.pan(delta);
                let o = vp.offset();
                assert!(o.x >= 0 && o.x <= max.x, "{o}");
                assert!(o.y >= 0 && o.y <= max.y, "{o}");
            }
        }
    }

    #[test]
    fn pan_reports_integer_changes_only() {
        let mut vp = Viewport::new(IVec2::new(100, 100), UVec2::new(10, 10), UVec2::new(1000, 1000));
        assert!(!vp.pan(Vec2::new(0.4, 0.0)));
        assert!(vp.pan(Vec2::new(0.7, 0.0)));
        assert_eq!(vp.offset(), IVec2::new(101, 100));
        vp.pan(Vec2::new(-1000.0, 0.0));
        assert!(!vp.pan(Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn character_sits_at_center() {
        let mut vp = Viewport::new(IVec2::ZERO, UVec2::new(1280, 720), UVec2::new(4472, 4816));
        vp.center_on(Vec2::new(1000.0, 1000.0));
        assert_eq!(vp.offset(), IVec2::new(360, 640));
        assert_eq!(vp.character_position(), Vec2::new(1000.0, 1000.0));
        assert_eq!(vp.viewport_to_world(Vec2::new(640.0, 360.0)), Vec2::new(1000.0, 1000.0));
    }
}
