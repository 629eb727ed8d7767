//! Asteroid Field - headless runner
//!
//! Usage: `asteroid-field [settings.json]`
//!
//! Spawns the configured asteroid field, drives it through the fixed-timestep
//! frame clock and logs a summary. Set `RUST_LOG=debug` for per-step detail.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Field (headless) starting...");

    if let Err(err) = native::run() {
        log::error!("{}", err);
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            log::error!("  caused by: {}", cause);
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use asteroid_field::sim::{FrameClock, SimState, StepReport};
    use asteroid_field::{Settings, SimError};

    pub fn run() -> Result<(), SimError> {
        let settings = match std::env::args().nth(1) {
            Some(path) => Settings::load(path)?,
            None => {
                log::info!("No settings file given, using defaults");
                Settings::default()
            }
        };

        let mut state = SimState::new(&settings)?;
        let spawned = state.populate(settings.initial_bodies);
        let energy_start = state.kinetic_energy();

        let mut clock = FrameClock::new();
        let mut totals = StepReport::default();
        for frame in 0..settings.frames {
            let report = clock.advance(&mut state, settings.frame_dt);
            totals.integrated += report.integrated;
            totals.culled += report.culled;
            totals.contacts += report.contacts;

            if report.contacts > 0 {
                log::debug!("Frame {}: {} contacts", frame, report.contacts);
            }
        }

        log::info!(
            "Ran {} frames ({} ticks, {:.2}s simulated)",
            settings.frames,
            state.time_ticks,
            state.time_ticks as f32 * asteroid_field::consts::SIM_DT
        );
        log::info!(
            "Bodies: {} spawned, {} remaining ({} alive), {} culled",
            spawned,
            state.pool.len(),
            state.pool.alive_count(),
            totals.culled
        );
        log::info!(
            "Contacts resolved: {}, kinetic energy {:.1} -> {:.1}",
            totals.contacts,
            energy_start,
            state.kinetic_energy()
        );
        Ok(())
    }
}
