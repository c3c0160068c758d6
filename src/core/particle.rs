use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DAMPING;
use crate::error::{ParticleError, Result};
use crate::utils::math::ParticleVecExt;

/// Point mass with position and velocity but no orientation.
///
/// Per tick the owner first lets force generators call [`Particle::add_force`],
/// then calls [`Particle::integrate`], which consumes and resets the
/// accumulated force. Forces added after integration carry over to the next
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParticleState", into = "ParticleState")]
pub struct Particle {
    position: Vec3,
    velocity: Vec3,
    /// Constant acceleration applied every tick regardless of mass.
    acceleration: Vec3,
    inverse_mass: f32,
    damping: f32,
    force_accum: Vec3,
}

/// Serialized form of a [`Particle`]. Loading goes through the same checks
/// as the setters; the force accumulator is not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleState {
    pub position: Vec3,
    pub velocity: Vec3,
    #[serde(default)]
    pub acceleration: Vec3,
    pub inverse_mass: f32,
    pub damping: f32,
}

impl TryFrom<ParticleState> for Particle {
    type Error = ParticleError;

    fn try_from(state: ParticleState) -> Result<Self> {
        let mut particle = Particle::default()
            .with_position(state.position)
            .with_velocity(state.velocity)
            .with_acceleration(state.acceleration);
        particle.set_inverse_mass(state.inverse_mass)?;
        particle.set_damping(state.damping)?;
        Ok(particle)
    }
}

impl From<Particle> for ParticleState {
    fn from(particle: Particle) -> Self {
        Self {
            position: particle.position,
            velocity: particle.velocity,
            acceleration: particle.acceleration,
            inverse_mass: particle.inverse_mass,
            damping: particle.damping,
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            inverse_mass: 1.0,
            damping: DEFAULT_DAMPING,
            force_accum: Vec3::ZERO,
        }
    }
}

impl Particle {
    /// Creates a particle at rest at the origin with the given mass.
    pub fn new(mass: f32) -> Result<Self> {
        let mut particle = Self::default();
        particle.set_mass(mass)?;
        Ok(particle)
    }

    /// Creates a particle with infinite mass. Forces never move it.
    pub fn immovable(position: Vec3) -> Self {
        Self {
            position,
            inverse_mass: 0.0,
            ..Self::default()
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Result<Self> {
        self.set_damping(damping)?;
        Ok(self)
    }

    /// Advances the particle by `dt` seconds using the accumulated force.
    ///
    /// Position moves with the velocity from the previous step, then velocity
    /// picks up `acceleration + force * inverse_mass` and decays by
    /// `damping^dt`. The force accumulator is cleared afterwards.
    pub fn integrate(&mut self, dt: f32) -> Result<()> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(ParticleError::InvalidTimeStep(dt));
        }
        self.integrate_unchecked(dt);
        Ok(())
    }

    /// Integration body for callers that already validated `dt`.
    pub(crate) fn integrate_unchecked(&mut self, dt: f32) {
        self.position.add_scaled_vector(self.velocity, dt);

        let mut resulting_acceleration = self.acceleration;
        resulting_acceleration.add_scaled_vector(self.force_accum, self.inverse_mass);

        self.velocity.add_scaled_vector(resulting_acceleration, dt);
        self.velocity *= self.damping.powf(dt);

        self.clear_accumulator();
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.force_accum += force;
    }

    pub fn clear_accumulator(&mut self) {
        self.force_accum.clear();
    }

    /// Force accumulated since the last integration.
    pub fn force_accumulator(&self) -> Vec3 {
        self.force_accum
    }

    /// True unless the particle has infinite mass (`inverse_mass == 0`).
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Mass in kilograms, `f32::MAX` for infinite mass.
    pub fn mass(&self) -> f32 {
        if self.inverse_mass == 0.0 {
            f32::MAX
        } else {
            1.0 / self.inverse_mass
        }
    }

    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if mass == 0.0 {
            return Err(ParticleError::ZeroMass);
        }
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(ParticleError::InvalidMass(mass));
        }
        self.inverse_mass = 1.0 / mass;
        Ok(())
    }

    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Sets the inverse mass directly; zero makes the particle immovable.
    pub fn set_inverse_mass(&mut self, inverse_mass: f32) -> Result<()> {
        if !(inverse_mass >= 0.0 && inverse_mass.is_finite()) {
            return Err(ParticleError::InvalidInverseMass(inverse_mass));
        }
        self.inverse_mass = inverse_mass;
        Ok(())
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Fraction of velocity kept after one second, in (0, 1].
    pub fn set_damping(&mut self, damping: f32) -> Result<()> {
        if !(damping > 0.0 && damping <= 1.0) {
            return Err(ParticleError::InvalidDamping(damping));
        }
        self.damping = damping;
        Ok(())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn position_into(&self, out: &mut Vec3) {
        *out = self.position;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn velocity_into(&self, out: &mut Vec3) {
        *out = self.velocity;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration = acceleration;
    }

    /// `0.5 * m * |v|²`, zero for immovable particles.
    pub fn kinetic_energy(&self) -> f32 {
        if !self.has_finite_mass() {
            return 0.0;
        }
        0.5 * self.mass() * self.velocity.length_squared()
    }
}
