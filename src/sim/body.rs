//! Convex polygon rigid bodies (the asteroids)
//!
//! A body keeps its corners relative to its own centroid. Rotation is applied
//! to the corners in place every step, so `vertex(i)` is just `centre +
//! corners[i]`; `rotation` is bookkeeping only.

use std::f32::consts::TAU;

use arrayvec::ArrayVec;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::geometry::{
    cross, edges, perp, point_on_triangle, polygon_area_moment_0, polygon_area_moment_1, polygon_area_moment_2,
    polygon_on_polygon,
};
use crate::consts::{DENSITY, EPSILON, MAX_CORNERS};
use crate::polar_to_cartesian;

/// Inline corner storage, no heap allocation per body
pub type Corners = ArrayVec<Vec2, MAX_CORNERS>;

/// Asteroid size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeClass {
    #[default]
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn index(self) -> usize {
        match self {
            SizeClass::Small => 0,
            SizeClass::Medium => 1,
            SizeClass::Large => 2,
        }
    }

    /// Corner count of a spawned body of this class
    pub fn corner_count(self) -> usize {
        match self {
            SizeClass::Small => 3,
            SizeClass::Medium => 4,
            SizeClass::Large => 6,
        }
    }

    /// Spawn radius of the outline before jitter
    pub fn radius(self) -> f32 {
        match self {
            SizeClass::Small => 12.0,
            SizeClass::Medium => 18.0,
            SizeClass::Large => 24.0,
        }
    }

    /// Starting hitpoints: `100 * (index + 1)²`
    pub fn hitpoints(self) -> f32 {
        let level = (self.index() + 1) as f32;
        100.0 * level * level
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A convex polygon rigid body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    /// Corner offsets from the centroid, counter-clockwise
    corners: Corners,
    /// World position of the centroid
    pub centre: Vec2,
    pub velocity: Vec2,
    /// Accumulated rotation (radians)
    pub rotation: f32,
    /// Angular velocity (radians/sec)
    pub spin: f32,
    /// Circumscribing radius (largest corner distance from the centroid)
    radius: f32,
    mass: f32,
    inverse_mass: f32,
    moment_of_inertia: f32,
    inverse_moment_of_inertia: f32,
    pub hitpoints: f32,
    /// Set when a collision was resolved this step (presentation only)
    #[serde(skip)]
    pub collision: bool,
    size_class: SizeClass,
}

impl Body {
    /// Build a body of `size_class` from a world-space outline
    ///
    /// The body is centred on the outline's centroid and starts with the class
    /// hitpoints. Returns `None` for outlines `initialise` rejects.
    pub fn from_vertices(size_class: SizeClass, vertices: &[Vec2]) -> Option<Self> {
        let mut body = Self {
            size_class,
            hitpoints: size_class.hitpoints(),
            ..Self::default()
        };
        body.initialise(vertices).then_some(body)
    }

    /// Spawn a randomised body somewhere in the arena
    pub fn random<R: Rng + ?Sized>(rng: &mut R, arena: &Arena) -> Self {
        let mut body = Self::default();
        body.randomise(rng, arena);
        body
    }

    /// Derive shape, radius, mass and inertia from a raw outline
    ///
    /// Corners are re-expressed relative to the centroid and `centre` is moved
    /// onto it. Clockwise outlines are reversed so corners are always stored
    /// counter-clockwise. Outlines with fewer than 3 or more than `MAX_CORNERS` corners,
    /// or with no area, leave the body untouched and return `false`.
    pub fn initialise(&mut self, vertices: &[Vec2]) -> bool {
        if vertices.len() < 3 || vertices.len() > MAX_CORNERS {
            log::warn!(
                "Rejected outline with {} corners (need 3..={})",
                vertices.len(),
                MAX_CORNERS
            );
            return false;
        }

        // Integrate relative to the first corner to keep world-space outlines precise
        let origin = vertices[0];
        let local: Corners = vertices.iter().map(|&v| v - origin).collect();
        let centroid = origin + polygon_area_moment_1(&local);

        let mut corners: Corners = vertices.iter().map(|&v| v - centroid).collect();
        let area = polygon_area_moment_0(&corners);
        let moment_2 = polygon_area_moment_2(&corners);
        if area <= EPSILON || moment_2 <= EPSILON {
            log::warn!("Rejected degenerate outline (area moment {})", area);
            return false;
        }

        let signed_area: f32 = edges(&corners).map(|(curr, next)| cross(curr, next)).sum();
        if signed_area < 0.0 {
            log::debug!("Reversed clockwise outline with {} corners", corners.len());
            corners.reverse();
        }

        self.radius = corners.iter().map(|c| c.length()).fold(0.0, f32::max);
        self.mass = DENSITY * area;
        self.inverse_mass = 1.0 / self.mass;
        self.moment_of_inertia = DENSITY * moment_2;
        self.inverse_moment_of_inertia = 1.0 / self.moment_of_inertia;
        self.centre = centroid;
        self.corners = corners;
        true
    }

    /// Reset into a random near-regular polygon with random pose and velocity
    pub fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R, arena: &Arena) {
        *self = Self::default();

        let size_class = SizeClass::random(rng);
        let n = size_class.corner_count();
        let radius = size_class.radius();
        let angle_step = TAU / n as f32;

        // Each corner drifts forward by less than half a step, keeping the winding
        let outline: Corners = (0..n)
            .map(|i| {
                let jitter = rng.random_range(0..n) as f32 * angle_step / (2.0 * n as f32);
                polar_to_cartesian(radius, i as f32 * angle_step + jitter)
            })
            .collect();

        self.size_class = size_class;
        if !self.initialise(&outline) {
            return;
        }

        self.centre = arena.random_point(rng);
        self.velocity = Vec2::new(random_speed(rng), random_speed(rng));
        let rotation = rng.random_range(0..360) as f32 * TAU / 360.0;
        self.rotate(rotation);
        self.hitpoints = size_class.hitpoints();
    }

    /// Advance pose by one step and wrap around the arena
    pub fn integrate(&mut self, dt: f32, arena: &Arena) {
        self.collision = false;
        self.rotate(self.spin * dt);
        self.centre = arena.wrap(self.centre + self.velocity * dt, self.radius);
    }

    /// Rotate the corners in place about the centroid
    pub fn rotate(&mut self, angle: f32) {
        if angle == 0.0 {
            return;
        }
        let rotation = Vec2::from_angle(angle);
        for corner in &mut self.corners {
            *corner = rotation.rotate(*corner);
        }
        self.rotation += angle;
    }

    /// Subtract hitpoints; returns `true` if this blow destroyed the body
    pub fn damage(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || !self.is_alive() {
            return false;
        }
        self.hitpoints -= amount;
        !self.is_alive()
    }

    /// World position of corner `i` (indices wrap around)
    pub fn vertex(&self, i: usize) -> Vec2 {
        if self.corners.is_empty() {
            return self.centre;
        }
        self.centre + self.corners[i % self.corners.len()]
    }

    /// All corners in world space
    pub fn world_vertices(&self) -> Corners {
        self.corners.iter().map(|&c| self.centre + c).collect()
    }

    /// Velocity of the body material at a world-space point
    #[inline]
    pub fn velocity_at(&self, point: Vec2) -> Vec2 {
        self.velocity + perp(point - self.centre) * self.spin
    }

    /// Check if a world-space point lies inside the polygon
    pub fn contains_point(&self, point: Vec2) -> bool {
        if self.corners.len() < 3 || point.distance(self.centre) > self.radius {
            return false;
        }
        let local = point - self.centre;
        let anchor = self.corners[0];
        self.corners
            .windows(2)
            .skip(1)
            .any(|pair| point_on_triangle(local, anchor, pair[0], pair[1]))
    }

    /// Exact overlap test against another body (separating axes)
    pub fn intersects(&self, other: &Body) -> bool {
        if self.centre.distance(other.centre) > self.radius + other.radius {
            return false;
        }
        polygon_on_polygon(&self.world_vertices(), &other.world_vertices())
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hitpoints > 0.0
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    /// Corner offsets from the centroid
    pub fn corners(&self) -> &[Vec2] {
        &self.corners
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    pub fn inverse_moment_of_inertia(&self) -> f32 {
        self.inverse_moment_of_inertia
    }
}

/// One spawn velocity component: `3 * (U{0..12} - U{0..6})`
fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let forward = rng.random_range(0..12);
    let back = rng.random_range(0..6);
    3.0 * (forward - back) as f32
}
