//! Static world boundaries
//!
//! Containers keep particles inside their interior. They never touch a
//! particle directly; every response goes through the emitted contacts.

pub mod circle;
pub mod rectangle;

pub use circle::CircleContainer;
pub use rectangle::RectangleContainer;

use crate::core::{Contact, Particle, ParticleHandle};

pub trait Container: Send + Sync {
    /// Appends one contact per violated wall to `out`.
    fn generate_contacts(
        &self,
        handle: ParticleHandle,
        particle: &Particle,
        out: &mut Vec<Contact>,
    );
}
