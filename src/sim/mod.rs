//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod geometry;
pub mod pool;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod fixtures;

pub use arena::Arena;
pub use body::{Body, Corners, SizeClass};
pub use collision::{Contact, broad_phase_overlap, collide, find_contact, resolve_contact};
pub use pool::{BodyPool, CullPolicy, StepReport};
pub use state::SimState;
pub use tick::{FrameClock, tick};
