//! Simulation state
//!
//! Everything a run needs lives here: the seeded RNG, the arena, the body pool
//! and the tick counter. Two states built from the same settings stay
//! identical as long as they are fed the same sequence of steps.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::arena::Arena;
use super::body::Body;
use super::pool::{BodyPool, CullPolicy};
use crate::error::SimError;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub arena: Arena,
    pub pool: BodyPool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub cull_policy: CullPolicy,
}

impl SimState {
    /// Create an empty simulation from validated settings
    pub fn new(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let pool = BodyPool::new(settings.pool_capacity)?;

        log::info!(
            "Simulation created: seed {}, arena {}x{}, capacity {}",
            settings.seed,
            settings.arena_width,
            settings.arena_height,
            settings.pool_capacity
        );

        Ok(Self {
            seed: settings.seed,
            rng: Pcg32::seed_from_u64(settings.seed),
            arena: settings.arena(),
            pool,
            time_ticks: 0,
            cull_policy: settings.cull_policy,
        })
    }

    /// Default settings with a different seed
    pub fn with_seed(seed: u64) -> Result<Self, SimError> {
        Self::new(&Settings {
            seed,
            ..Default::default()
        })
    }

    /// Spawn up to `count` random bodies; returns how many fit in the pool
    pub fn populate(&mut self, count: usize) -> usize {
        let mut spawned = 0;
        for _ in 0..count {
            if !self.spawn_random() {
                break;
            }
            spawned += 1;
        }

        if spawned < count {
            log::warn!("Pool full: spawned {} of {} requested bodies", spawned, count);
        } else {
            log::info!("Spawned {} bodies", spawned);
        }
        spawned
    }

    /// Spawn one randomised body
    pub fn spawn_random(&mut self) -> bool {
        if self.pool.is_full() {
            return false;
        }
        let body = Body::random(&mut self.rng, &self.arena);
        self.pool.insert(body)
    }

    /// Add an explicit body; `false` when the pool is full
    pub fn spawn(&mut self, body: Body) -> bool {
        self.pool.insert(body)
    }

    /// The run's RNG, for callers spawning their own randomised bodies
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Total kinetic energy (linear part only), handy for run summaries
    pub fn kinetic_energy(&self) -> f32 {
        self.pool
            .iter()
            .map(|b| 0.5 * b.mass() * b.velocity.length_squared())
            .sum()
    }
}
