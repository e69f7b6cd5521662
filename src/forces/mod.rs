//! Force strategies
//!
//! A force reads particle state and accumulates into `Particle::force`. It
//! never moves a particle; the integrator turns the accumulated force into
//! motion.

pub mod fluid;
pub mod global;

pub use fluid::{BuoyancyForce, WaterDragForce, submerged_area};
pub use global::{Gravity, LinearDrag, RadialForce, WindForce};

use crate::core::Particle;
use crate::math::Real;

pub trait Force: Send + Sync {
    fn apply(&self, particle: &mut Particle, dt: Real);

    /// Spatial gate for local forces. Global forces ignore it.
    fn is_in_region(&self, _particle: &Particle) -> bool {
        true
    }
}
