//! Simulation dynamics: force generators, the force registry, and integration.

pub mod forces;
pub mod integrator;
pub mod registry;

pub use forces::{
    AsAny, GeneratorArena, ParticleAnchoredSpring, ParticleBungee, ParticleBuoyancy, ParticleDrag,
    ParticleForceGenerator, ParticleGravity, ParticleSpring,
};
pub use integrator::ParticleIntegrator;
pub use registry::{ParticleForceRegistration, ParticleForceRegistry};
