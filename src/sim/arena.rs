//! Rectangular play field with screen wrap
//!
//! The arena spans `[0, width] × [0, height]`. Bodies wrap once their centre
//! leaves the arena extended by a margin (their own radius), so a body is fully
//! off-screen before it reappears on the opposite side.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Lower corner of the arena extended by `margin`
    #[inline]
    pub fn min(&self, margin: f32) -> Vec2 {
        Vec2::splat(-margin)
    }

    /// Upper corner of the arena extended by `margin`
    #[inline]
    pub fn max(&self, margin: f32) -> Vec2 {
        Vec2::new(self.width + margin, self.height + margin)
    }

    /// Check if a point lies inside the arena extended by `margin` (edges included)
    pub fn contains(&self, pos: Vec2, margin: f32) -> bool {
        let min = self.min(margin);
        let max = self.max(margin);
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }

    /// Wrap a position that left the extended arena onto the opposite edge
    ///
    /// A coordinate below the minimum jumps to the maximum and vice versa;
    /// positions inside the extended arena are returned unchanged.
    pub fn wrap(&self, pos: Vec2, margin: f32) -> Vec2 {
        let min = self.min(margin);
        let max = self.max(margin);
        let mut wrapped = pos;

        if wrapped.x < min.x {
            wrapped.x = max.x;
        }
        if wrapped.y < min.y {
            wrapped.y = max.y;
        }
        if wrapped.x > max.x {
            wrapped.x = min.x;
        }
        if wrapped.y > max.y {
            wrapped.y = min.y;
        }
        wrapped
    }

    /// Uniform random point inside the (unextended) arena
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..self.width),
            rng.random_range(0.0..self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wrap_leaves_interior_untouched() {
        let arena = Arena::new(800.0, 600.0);
        let pos = Vec2::new(-11.0, 605.0);
        assert_eq!(arena.wrap(pos, 12.0), pos);
    }

    #[test]
    fn test_wrap_mirrors_each_edge() {
        let arena = Arena::new(800.0, 600.0);
        let margin = 12.0;

        // Past the right edge: reappears at the left extended boundary
        let wrapped = arena.wrap(Vec2::new(813.0, 300.0), margin);
        assert_eq!(wrapped, Vec2::new(-12.0, 300.0));

        // Past the left edge
        let wrapped = arena.wrap(Vec2::new(-12.5, 300.0), margin);
        assert_eq!(wrapped, Vec2::new(812.0, 300.0));

        // Past the bottom and top edges
        let wrapped = arena.wrap(Vec2::new(400.0, 612.1), margin);
        assert_eq!(wrapped, Vec2::new(400.0, -12.0));
        let wrapped = arena.wrap(Vec2::new(400.0, -13.0), margin);
        assert_eq!(wrapped, Vec2::new(400.0, 612.0));
    }

    #[test]
    fn test_wrap_corner() {
        let arena = Arena::new(100.0, 100.0);
        let wrapped = arena.wrap(Vec2::new(-5.0, 120.0), 2.0);
        assert_eq!(wrapped, Vec2::new(102.0, -2.0));
    }

    #[test]
    fn test_random_point_inside() {
        let arena = Arena::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert!(arena.contains(arena.random_point(&mut rng), 0.0));
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_is_identity_inside(
            x in -23.9f32..823.9,
            y in -23.9f32..623.9,
        ) {
            let arena = Arena::default();
            let pos = Vec2::new(x, y);
            prop_assert_eq!(arena.wrap(pos, 24.0), pos);
        }

        #[test]
        fn prop_wrap_lands_in_extended_arena(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            margin in 0.0f32..30.0,
        ) {
            let arena = Arena::default();
            let wrapped = arena.wrap(Vec2::new(x, y), margin);
            prop_assert!(arena.contains(wrapped, margin));
        }
    }
}
