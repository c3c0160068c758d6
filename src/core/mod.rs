//! Core particle state and its caller-owned storage.

pub mod particle;

pub use particle::{Particle, ParticleState};

use crate::utils::allocator::{Arena, ParticleId};

/// Generational storage for particles addressed by [`ParticleId`].
pub type ParticleArena = Arena<Particle, ParticleId>;
