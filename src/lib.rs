use bevy::prelude::*;

pub mod config;
pub mod constraints;
pub mod containers;
pub mod controller;
pub mod core;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use config::SolverParams;
pub use constraints::{Constraint, DistanceConstraint};
pub use containers::{CircleContainer, Container, RectangleContainer};
pub use controller::SimulationController;
pub use crate::core::{
    Contact, ContactBody, Particle, ParticleHandle, ParticleSet, ParticleSystem, StaticBody,
    StepStats,
};
pub use error::{PhysicsError, Result};
pub use forces::{BuoyancyForce, Force, Gravity, LinearDrag, RadialForce, WaterDragForce, WindForce};
pub use geometry::{Aabb, SpatialHashGrid};

use crate::config::constants::DEFAULT_TIMESTEP;
use crate::math::Real;

/// Steps the [`ParticleSystem`] resource on bevy's fixed timestep, gated by
/// the [`SimulationController`].
///
/// A `ParticleSystem` inserted before the plugin is kept.
pub struct ParticlePlugin {
    /// Fixed step length in seconds
    pub timestep: Real,
}

impl Default for ParticlePlugin {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
        }
    }
}

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(self.timestep))
            .init_resource::<SimulationController>()
            .init_resource::<ParticleSystem>()
            .add_systems(FixedUpdate, step_particle_system);
    }
}

pub fn step_particle_system(
    time: Res<Time<Fixed>>,
    mut controller: ResMut<SimulationController>,
    mut system: ResMut<ParticleSystem>,
) {
    if controller.should_reset() {
        system.clear();
        info!("particle system reset");
    }
    if controller.should_step() {
        system.step(time.timestep().as_secs_f64());
    }
}
