//! Asteroid Field - convex-polygon rigid bodies in a wrapping arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry kernel, bodies, pool, collisions)
//! - `settings`: Data-driven simulation configuration
//! - `error`: Failures surfaced to the embedding application

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Hard ceiling on simultaneously simulated bodies
    pub const POOL_CAPACITY: usize = 100;
    /// Bodies spawned when a run starts
    pub const INITIAL_BODIES: usize = 24;

    /// Largest corner count any body can carry
    pub const MAX_CORNERS: usize = 6;
    /// Mass per unit of polygon area
    pub const DENSITY: f32 = 1.0;

    /// Shared tolerance for degenerate-geometry guards
    pub const EPSILON: f32 = 1e-6;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
