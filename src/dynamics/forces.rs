use std::any::Any;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LIQUID_DENSITY;
use crate::core::{Particle, ParticleArena};
use crate::utils::allocator::{Arena, GeneratorId, ParticleId};
use crate::utils::math::direction_or_zero;

/// Concrete-type access for boxed generators. Implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Rule that contributes a force to one particle per tick.
///
/// Generators only ever add to the target's force accumulator. They never
/// touch position or velocity and never read or reset the accumulator.
pub trait ParticleForceGenerator: AsAny + Send + Sync {
    /// Force exerted on `particle` this tick, or `None` when the generator
    /// contributes nothing. `particles` gives read access to other endpoints.
    fn force(&self, particle: &Particle, particles: &ParticleArena, dt: f32) -> Option<Vec3>;

    /// Adds this generator's force to the accumulator of `particle`.
    /// A stale handle is ignored.
    fn update_force(&self, particle: ParticleId, particles: &mut ParticleArena, dt: f32) {
        let force = match particles.get(particle) {
            Some(target) => self.force(target, particles, dt),
            None => return,
        };
        if let (Some(force), Some(target)) = (force, particles.get_mut(particle)) {
            target.add_force(force);
        }
    }
}

/// Generational storage for boxed force generators addressed by [`GeneratorId`].
pub type GeneratorArena = Arena<Box<dyn ParticleForceGenerator>, GeneratorId>;

/// Uniform gravitational field; force scales with particle mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleGravity {
    pub gravity: Vec3,
}

impl ParticleGravity {
    pub fn new(gravity: Vec3) -> Self {
        Self { gravity }
    }
}

impl ParticleForceGenerator for ParticleGravity {
    fn force(&self, particle: &Particle, _particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        if !particle.has_finite_mass() {
            return None;
        }
        Some(self.gravity * particle.mass())
    }
}

/// Linear plus quadratic drag opposing the direction of motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleDrag {
    /// Coefficient on speed.
    pub k1: f32,
    /// Coefficient on speed squared.
    pub k2: f32,
}

impl ParticleDrag {
    pub fn new(k1: f32, k2: f32) -> Self {
        Self { k1, k2 }
    }
}

impl ParticleForceGenerator for ParticleDrag {
    fn force(&self, particle: &Particle, _particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        let velocity = particle.velocity();
        let speed = velocity.length();
        let drag_coeff = self.k1 * speed + self.k2 * speed * speed;
        Some(-direction_or_zero(velocity) * drag_coeff)
    }
}

/// `-dir(d) * k * abs(|d| - rest)`. The sign of the extension is dropped, so
/// the force always points back along `d`.
fn spring_force(displacement: Vec3, spring_constant: f32, rest_length: f32) -> Vec3 {
    let magnitude = (displacement.length() - rest_length).abs() * spring_constant;
    -direction_or_zero(displacement) * magnitude
}

/// Spring between the target and another particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSpring {
    /// Particle at the other end of the spring.
    pub other: ParticleId,
    pub spring_constant: f32,
    pub rest_length: f32,
}

impl ParticleSpring {
    pub fn new(other: ParticleId, spring_constant: f32, rest_length: f32) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }
}

impl ParticleForceGenerator for ParticleSpring {
    fn force(&self, particle: &Particle, particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        let other = particles.get(self.other)?;
        let displacement = particle.position() - other.position();
        Some(spring_force(
            displacement,
            self.spring_constant,
            self.rest_length,
        ))
    }
}

/// Spring whose far end is fixed at a point in space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleAnchoredSpring {
    anchor: Vec3,
    pub spring_constant: f32,
    pub rest_length: f32,
}

impl ParticleAnchoredSpring {
    pub fn new(anchor: Vec3, spring_constant: f32, rest_length: f32) -> Self {
        Self {
            anchor,
            spring_constant,
            rest_length,
        }
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }
}

impl ParticleForceGenerator for ParticleAnchoredSpring {
    fn force(&self, particle: &Particle, _particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        let displacement = particle.position() - self.anchor;
        Some(spring_force(
            displacement,
            self.spring_constant,
            self.rest_length,
        ))
    }
}

/// Spring that only pulls: no force while the ends are closer than the rest length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBungee {
    /// Particle at the other end of the bungee.
    pub other: ParticleId,
    pub spring_constant: f32,
    pub rest_length: f32,
}

impl ParticleBungee {
    pub fn new(other: ParticleId, spring_constant: f32, rest_length: f32) -> Self {
        Self {
            other,
            spring_constant,
            rest_length,
        }
    }
}

impl ParticleForceGenerator for ParticleBungee {
    fn force(&self, particle: &Particle, particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        let other = particles.get(self.other)?;
        let displacement = particle.position() - other.position();

        let length = displacement.length();
        if length <= self.rest_length {
            return None;
        }

        let magnitude = self.spring_constant * (length - self.rest_length);
        Some(-direction_or_zero(displacement) * magnitude)
    }
}

/// Vertical lift from a liquid plane at `water_height`, interpolated while
/// the particle is within `max_depth` of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBuoyancy {
    /// Depth past which the object counts as fully submerged.
    pub max_depth: f32,
    pub volume: f32,
    /// Height of the liquid surface along Y.
    pub water_height: f32,
    /// kg/m³; water is 1000.
    pub liquid_density: f32,
}

impl ParticleBuoyancy {
    pub fn new(max_depth: f32, volume: f32, water_height: f32) -> Self {
        Self::with_density(max_depth, volume, water_height, DEFAULT_LIQUID_DENSITY)
    }

    pub fn with_density(
        max_depth: f32,
        volume: f32,
        water_height: f32,
        liquid_density: f32,
    ) -> Self {
        Self {
            max_depth,
            volume,
            water_height,
            liquid_density,
        }
    }
}

impl ParticleForceGenerator for ParticleBuoyancy {
    fn force(&self, particle: &Particle, _particles: &ParticleArena, _dt: f32) -> Option<Vec3> {
        let depth = particle.position().y;

        if depth >= self.water_height + self.max_depth {
            return None;
        }

        let full = self.liquid_density * self.volume;
        if depth <= self.water_height - self.max_depth {
            return Some(Vec3::new(0.0, full, 0.0));
        }

        let partial =
            full * (depth - self.max_depth - self.water_height) / (2.0 * self.max_depth);
        Some(Vec3::new(0.0, partial, 0.0))
    }
}
