//! Construction-time errors.
//!
//! Stepping never fails: numerical trouble inside a step is recovered locally
//! (fallback normals, zero vectors) or, for non-finite particles, by killing
//! the particle. Only building particles, containers, grids and parameter
//! sets can be rejected.

use thiserror::Error;

use crate::core::ParticleHandle;
use crate::math::Real;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("particle mass must be positive, got {mass}")]
    NonPositiveMass { mass: Real },

    #[error("particle mass {mass} is too small to invert")]
    MassTooSmall { mass: Real },

    #[error("particle radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: Real },

    #[error("broadphase cell size must be positive and finite, got {cell_size}")]
    InvalidCellSize { cell_size: Real },

    #[error("invalid bounds: min must be <= max and extents must be positive")]
    InvalidBounds,

    #[error("solver parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: Real },

    #[error("unknown or removed particle {0:?}")]
    UnknownParticle(ParticleHandle),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
