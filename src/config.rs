//! Global configuration constants and world settings.

use serde::{Deserialize, Serialize};

/// Default gravity vector (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Default per-second velocity retention for new particles.
pub const DEFAULT_DAMPING: f32 = 0.999;

/// Density of water in kg/m³.
pub const DEFAULT_LIQUID_DENSITY: f32 = 1000.0;

/// Upper bound on fixed ticks run by a single `advance` call.
pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;

/// Settings for a [`ParticleWorld`](crate::world::ParticleWorld).
///
/// ```
/// use particle_dynamics::config::WorldConfig;
///
/// let config = WorldConfig::new()
///     .with_time_step(1.0 / 120.0)
///     .with_max_substeps(4)
///     .with_parallel(false);
/// assert_eq!(config.max_substeps, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Fixed tick length used by `advance`. Non-positive values fall back to the default.
    pub time_step: f32,
    /// Maximum ticks per `advance` call; leftover time is dropped.
    pub max_substeps: u32,
    /// Integrate particles on the rayon pool when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl WorldConfig {
    pub fn new() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            parallel: false,
        }
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}
