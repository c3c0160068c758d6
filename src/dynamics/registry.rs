use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::ParticleArena;
use crate::dynamics::forces::GeneratorArena;
use crate::utils::allocator::{GeneratorId, ParticleId};

/// One generator bound to one particle. Both handles are non-owning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleForceRegistration {
    pub particle: ParticleId,
    pub generator: GeneratorId,
}

/// Association table binding force generators to the particles they act on.
///
/// The registry only stores handles. Particles and generators live in
/// caller-owned arenas that are passed to [`update_forces`](Self::update_forces),
/// so removing either from its arena never leaves a dangling reference here;
/// the registration simply becomes stale and is skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleForceRegistry {
    registrations: Vec<ParticleForceRegistration>,
}

impl ParticleForceRegistry {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Binds `generator` to `particle`. Duplicate pairs are kept and applied twice.
    pub fn add(&mut self, particle: ParticleId, generator: GeneratorId) {
        self.registrations.push(ParticleForceRegistration {
            particle,
            generator,
        });
    }

    /// Removes the first registration matching the pair. Returns whether one was found.
    pub fn remove(&mut self, particle: ParticleId, generator: GeneratorId) -> bool {
        let position = self
            .registrations
            .iter()
            .position(|reg| reg.particle == particle && reg.generator == generator);
        match position {
            Some(index) => {
                self.registrations.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every registration targeting `particle`.
    pub fn remove_particle(&mut self, particle: ParticleId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|reg| reg.particle != particle);
        before - self.registrations.len()
    }

    /// Drops every registration using `generator`.
    pub fn remove_generator(&mut self, generator: GeneratorId) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|reg| reg.generator != generator);
        before - self.registrations.len()
    }

    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    pub fn contains(&self, particle: ParticleId, generator: GeneratorId) -> bool {
        self.registrations
            .iter()
            .any(|reg| reg.particle == particle && reg.generator == generator)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleForceRegistration> + '_ {
        self.registrations.iter()
    }

    /// Runs every registration once, in insertion order, adding forces to the
    /// particles' accumulators. Does not integrate.
    ///
    /// Returns the number of registrations applied; stale ones are skipped.
    pub fn update_forces(
        &self,
        particles: &mut ParticleArena,
        generators: &GeneratorArena,
        dt: f32,
    ) -> usize {
        let mut applied = 0;
        for reg in &self.registrations {
            let Some(generator) = generators.get(reg.generator) else {
                trace!("skipping registration with stale {}", reg.generator);
                continue;
            };
            if !particles.contains(reg.particle) {
                trace!("skipping registration with stale {}", reg.particle);
                continue;
            }
            generator.update_force(reg.particle, particles, dt);
            applied += 1;
        }
        applied
    }
}
