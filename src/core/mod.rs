pub mod contact;
pub mod particle;
pub mod particle_set;
pub mod particle_system;

pub use contact::{Contact, ContactBody, StaticBody};
pub use particle::Particle;
pub use particle_set::{ParticleHandle, ParticleSet};
pub use particle_system::{ParticleSystem, StepStats};
