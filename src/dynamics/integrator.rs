use crate::core::ParticleArena;
use crate::error::{ParticleError, Result};

/// Integrator responsible for stepping every stored particle forward in time.
///
/// Integration of one particle never reads another, so with the `parallel`
/// feature the batch can be spread across the rayon pool.
#[derive(Debug, Clone, Default)]
pub struct ParticleIntegrator {
    parallel: bool,
}

impl ParticleIntegrator {
    pub fn new() -> Self {
        Self { parallel: false }
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Integrates every particle in `particles` by `dt`, clearing their
    /// accumulators. Returns the number of particles integrated.
    pub fn integrate_all(&self, particles: &mut ParticleArena, dt: f32) -> Result<usize> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ParticleError::InvalidTimeStep(dt));
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            if self.parallel {
                particles
                    .par_iter_mut()
                    .for_each(|particle| particle.integrate_unchecked(dt));
                return Ok(particles.len());
            }
        }

        let mut count = 0;
        for particle in particles.iter_mut() {
            particle.integrate_unchecked(dt);
            count += 1;
        }
        Ok(count)
    }
}
