use std::time::Instant;

use log::{debug, warn};

use crate::{
    config::{WorldConfig, DEFAULT_MAX_SUBSTEPS, DEFAULT_TIME_STEP},
    core::{Particle, ParticleArena},
    dynamics::{
        forces::{GeneratorArena, ParticleForceGenerator},
        integrator::ParticleIntegrator,
        registry::ParticleForceRegistry,
    },
    error::{ParticleError, Result},
    utils::{
        allocator::{GeneratorId, ParticleId},
        logging::{self, warn_if_frame_budget_exceeded},
        profiling::{self, StepProfiler},
    },
};

/// Host loop bundling particle storage, generator storage, the force
/// registry and the integrator.
///
/// One tick is always: every registration adds its force, then every particle
/// is integrated (including particles with no registrations).
pub struct ParticleWorld {
    particles: ParticleArena,
    generators: GeneratorArena,
    registry: ParticleForceRegistry,
    integrator: ParticleIntegrator,
    time_step: f32,
    time_accumulated: f32,
    /// Ticks completed since creation.
    tick: u64,
    max_substeps: u32,
    frame_budget_ms: Option<f32>,
    profiler: StepProfiler,
}

impl Default for ParticleWorld {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl ParticleWorld {
    pub fn new(time_step: f32) -> Self {
        let ts = if time_step > 0.0 && time_step.is_finite() {
            time_step
        } else {
            DEFAULT_TIME_STEP
        };

        Self {
            particles: ParticleArena::new(),
            generators: GeneratorArena::new(),
            registry: ParticleForceRegistry::new(),
            integrator: ParticleIntegrator::new(),
            time_step: ts,
            time_accumulated: 0.0,
            tick: 0,
            max_substeps: DEFAULT_MAX_SUBSTEPS,
            frame_budget_ms: None,
            profiler: StepProfiler::default(),
        }
    }

    pub fn from_config(config: &WorldConfig) -> Self {
        let mut world = Self::new(config.time_step);
        world.max_substeps = config.max_substeps.max(1);
        world.set_parallel_enabled(config.parallel);
        world
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Number of ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.integrator.set_parallel(enabled);
    }

    pub fn parallel_enabled(&self) -> bool {
        self.integrator.parallel()
    }

    /// Warn whenever a tick takes longer than `budget_ms`.
    pub fn set_frame_budget(&mut self, budget_ms: Option<f32>) {
        self.frame_budget_ms = budget_ms;
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        self.particles.insert(particle)
    }

    /// Removes a particle together with every registration targeting it.
    /// Springs that use it as their far end stop producing force.
    pub fn remove_particle(&mut self, id: ParticleId) -> Option<Particle> {
        let particle = self.particles.remove(id)?;
        let dropped = self.registry.remove_particle(id);
        debug!("removed {id} and {dropped} registrations");
        Some(particle)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id)
    }

    pub fn particles(&self) -> &ParticleArena {
        &self.particles
    }

    pub fn add_generator<G>(&mut self, generator: G) -> GeneratorId
    where
        G: ParticleForceGenerator + 'static,
    {
        self.generators.insert(Box::new(generator))
    }

    /// Removes a generator together with every registration using it.
    pub fn remove_generator(&mut self, id: GeneratorId) -> Option<Box<dyn ParticleForceGenerator>> {
        let generator = self.generators.remove(id)?;
        let dropped = self.registry.remove_generator(id);
        debug!("removed {id} and {dropped} registrations");
        Some(generator)
    }

    pub fn generator(&self, id: GeneratorId) -> Option<&dyn ParticleForceGenerator> {
        self.generators.get(id).map(|g| g.as_ref())
    }

    /// Typed read access to a stored generator. `None` if the handle is stale
    /// or the generator is not a `G`.
    pub fn generator_as<G>(&self, id: GeneratorId) -> Option<&G>
    where
        G: ParticleForceGenerator + 'static,
    {
        let generator = &**self.generators.get(id)?;
        generator.as_any().downcast_ref::<G>()
    }

    /// Typed mutable access to a stored generator, e.g. to move the anchor of
    /// a [`ParticleAnchoredSpring`](crate::dynamics::forces::ParticleAnchoredSpring)
    /// between ticks. Registrations are unaffected.
    pub fn generator_mut<G>(&mut self, id: GeneratorId) -> Option<&mut G>
    where
        G: ParticleForceGenerator + 'static,
    {
        let generator = &mut **self.generators.get_mut(id)?;
        generator.as_any_mut().downcast_mut::<G>()
    }

    /// Binds a generator to a particle. Both handles must be live.
    pub fn register(&mut self, particle: ParticleId, generator: GeneratorId) -> Result<()> {
        if !self.particles.contains(particle) {
            return Err(ParticleError::UnknownParticle(particle));
        }
        if !self.generators.contains(generator) {
            return Err(ParticleError::UnknownGenerator(generator));
        }
        self.registry.add(particle, generator);
        Ok(())
    }

    pub fn unregister(&mut self, particle: ParticleId, generator: GeneratorId) -> bool {
        self.registry.remove(particle, generator)
    }

    pub fn registry(&self) -> &ParticleForceRegistry {
        &self.registry
    }

    /// Runs exactly one tick of length `dt`.
    pub fn step(&mut self, dt: f32) -> Result<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ParticleError::InvalidTimeStep(dt));
        }

        let frame_start = Instant::now();
        self.profiler.reset();
        self.profiler.particle_count = self.particles.len();
        self.profiler.registration_count = self.registry.len();

        let applied = {
            let _trace = logging::ScopedTimer::new("forces::update", self.tick);
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.force_time);
            self.registry
                .update_forces(&mut self.particles, &self.generators, dt)
        };
        self.profiler.applied_count = applied;

        {
            let _trace = logging::ScopedTimer::new("integrator", self.tick);
            let _timer = profiling::ScopedTimer::new(&mut self.profiler.integrator_time);
            self.integrator.integrate_all(&mut self.particles, dt)?;
        }

        self.profiler.total_frame_time = frame_start.elapsed();
        if let Some(budget) = self.frame_budget_ms {
            warn_if_frame_budget_exceeded(self.tick, self.profiler.total_frame_time, budget);
        }
        self.tick += 1;
        Ok(())
    }

    /// Accumulates `elapsed` seconds and runs as many fixed ticks as fit.
    ///
    /// At most `max_substeps` ticks run per call; any backlog beyond that is
    /// dropped. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: f32) -> Result<u32> {
        if !(elapsed >= 0.0 && elapsed.is_finite()) {
            return Err(ParticleError::InvalidTimeStep(elapsed));
        }

        self.time_accumulated += elapsed;
        let mut ticks = 0;
        while self.time_accumulated >= self.time_step {
            if ticks == self.max_substeps {
                warn!(
                    "dropping {:.4} s of simulation backlog after {} ticks",
                    self.time_accumulated, ticks
                );
                self.time_accumulated = 0.0;
                break;
            }
            self.time_accumulated -= self.time_step;
            self.step(self.time_step)?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn interpolation_alpha(&self) -> f32 {
        self.time_accumulated / self.time_step
    }
}
