//! Hand-built outlines shared by the simulation tests

use glam::Vec2;

use super::body::{Body, SizeClass};

/// Isosceles triangle with centroid `centre`, radius 12, flat edge on the left
pub fn arrow_right(centre: Vec2) -> Body {
    let half = 128.0f32.sqrt();
    Body::from_vertices(SizeClass::Small, &[
        centre + Vec2::new(8.0, 0.0),
        centre + Vec2::new(-4.0, half),
        centre + Vec2::new(-4.0, -half),
    ])
    .unwrap()
}

/// Equilateral triangle with centroid `centre`, radius 12, pointing left
pub fn arrow_left(centre: Vec2) -> Body {
    let h = 6.0 * 3.0f32.sqrt();
    Body::from_vertices(SizeClass::Small, &[
        centre + Vec2::new(-12.0, 0.0),
        centre + Vec2::new(6.0, -h),
        centre + Vec2::new(6.0, h),
    ])
    .unwrap()
}

/// Axis-aligned square body of `size_class` centred on `centre`
pub fn square(size_class: SizeClass, centre: Vec2, half: f32) -> Body {
    Body::from_vertices(size_class, &[
        centre + Vec2::new(-half, -half),
        centre + Vec2::new(half, -half),
        centre + Vec2::new(half, half),
        centre + Vec2::new(-half, half),
    ])
    .unwrap()
}
