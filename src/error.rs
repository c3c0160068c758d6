//! Error types for particle operations.
//!
//! Only invalid arguments are reported. Degenerate numeric setups such as a
//! zero-length spring or a particle at rest under drag are defined edge cases
//! and produce a zero force instead of an error.

use thiserror::Error;

use crate::utils::allocator::{GeneratorId, ParticleId};

/// Errors raised by particle and world operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticleError {
    /// Integration step must be strictly positive and finite.
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    /// Mass of exactly zero has no inverse.
    #[error("mass must be non-zero")]
    ZeroMass,
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    /// Inverse mass must be zero (infinite mass) or positive and finite.
    #[error("inverse mass must be non-negative and finite, got {0}")]
    InvalidInverseMass(f32),
    /// Damping must lie in (0, 1].
    #[error("damping must be in (0, 1], got {0}")]
    InvalidDamping(f32),
    /// Handle does not refer to a live particle.
    #[error("unknown particle {0}")]
    UnknownParticle(ParticleId),
    /// Handle does not refer to a live force generator.
    #[error("unknown force generator {0}")]
    UnknownGenerator(GeneratorId),
}

/// Convenient Result alias for particle operations.
pub type Result<T> = std::result::Result<T, ParticleError>;
