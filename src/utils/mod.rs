//! Utility helpers: vector extensions, the generational arena, logging, and profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, ArenaKey, GenerationalId, GeneratorId, ParticleId};
pub use math::*;
