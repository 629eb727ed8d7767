//! Simulation settings
//!
//! Loaded from a JSON file by the runner. Missing fields take their defaults,
//! which reproduce the classic 800x600 field with 24 asteroids.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, INITIAL_BODIES, POOL_CAPACITY, SIM_DT};
use crate::error::SimError;
use crate::sim::{Arena, CullPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Population ===
    /// Seed for every random draw in a run
    pub seed: u64,
    /// Bodies spawned at start
    pub initial_bodies: usize,
    /// Maximum bodies alive at once
    pub pool_capacity: usize,
    /// How dead bodies are culled during integration
    pub cull_policy: CullPolicy,

    // === Runner ===
    /// Wall-clock seconds per frame fed to the frame clock
    pub frame_dt: f32,
    /// Frames to run before exiting
    pub frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            seed: 12345,
            initial_bodies: INITIAL_BODIES,
            pool_capacity: POOL_CAPACITY,
            cull_policy: CullPolicy::default(),

            frame_dt: SIM_DT,
            frames: 600,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        for (field, value) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be a positive number, got {}", value)));
            }
        }
        if !(self.frame_dt.is_finite() && self.frame_dt >= 0.0) {
            return Err(invalid(
                "frame_dt",
                format!("must be a non-negative number, got {}", self.frame_dt),
            ));
        }
        if self.initial_bodies > self.pool_capacity {
            return Err(invalid(
                "initial_bodies",
                format!(
                    "{} exceeds pool_capacity {}",
                    self.initial_bodies, self.pool_capacity
                ),
            ));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }
}

fn invalid(field: &'static str, reason: String) -> SimError {
    SimError::InvalidSettings { field, reason }
}
