//! Particle Dynamics – point-mass simulation core for Rust.
//!
//! Particles are advanced by an explicit integrator after a registry of
//! force generators (gravity, drag, springs, bungees, buoyancy) has added
//! its forces. Particles and generators live in caller-owned generational
//! arenas; the registry only stores handles into them.
//!
//! ```
//! use particle_dynamics::*;
//!
//! let mut world = ParticleWorld::new(1.0 / 60.0);
//! let ball = world.add_particle(
//!     Particle::new(2.0).unwrap().with_position(Vec3::new(0.0, 10.0, 0.0)),
//! );
//! let gravity = world.add_generator(ParticleGravity::new(Vec3::new(0.0, -9.81, 0.0)));
//! world.register(ball, gravity).unwrap();
//!
//! world.step(1.0 / 60.0).unwrap();
//! world.step(1.0 / 60.0).unwrap();
//! assert!(world.particle(ball).unwrap().position().y < 10.0);
//! ```

pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec3;

pub use crate::config::WorldConfig;
pub use crate::core::{Particle, ParticleArena};
pub use crate::dynamics::{
    forces::{
        AsAny, GeneratorArena, ParticleAnchoredSpring, ParticleBungee, ParticleBuoyancy, ParticleDrag,
        ParticleForceGenerator, ParticleGravity, ParticleSpring,
    },
    integrator::ParticleIntegrator,
    registry::{ParticleForceRegistration, ParticleForceRegistry},
};
pub use crate::error::ParticleError;
pub use crate::utils::allocator::{Arena, ArenaKey, GeneratorId, ParticleId};
pub use crate::utils::math::ParticleVecExt;
pub use crate::world::ParticleWorld;
