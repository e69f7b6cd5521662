//! Contacts produced by the narrowphase and by containers.

use crate::config::constants;
use crate::core::ParticleHandle;
use crate::math::{Point, Real, Vector};

/// Immovable collision partner with infinite mass.
/// Used for world boundaries and containers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaticBody {
    pub restitution: Real,
    pub friction: Real,
}

impl Default for StaticBody {
    fn default() -> Self {
        Self {
            restitution: constants::STATIC_BODY_RESTITUTION,
            friction: constants::STATIC_BODY_FRICTION,
        }
    }
}

impl StaticBody {
    pub fn new(restitution: Real, friction: Real) -> Self {
        Self {
            restitution,
            friction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactBody {
    Particle(ParticleHandle),
    Static(StaticBody),
}

/// One confirmed overlap for the current step.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub a: ParticleHandle,
    pub b: ContactBody,
    /// Unit vector pointing from A to B
    pub normal: Vector,
    /// Overlap depth (> 0)
    pub penetration: Real,
    pub points: Vec<Point>,
}

impl Contact {
    pub fn between_particles(
        a: ParticleHandle,
        b: ParticleHandle,
        normal: Vector,
        penetration: Real,
        point: Point,
    ) -> Self {
        Self {
            a,
            b: ContactBody::Particle(b),
            normal,
            penetration,
            points: vec![point],
        }
    }

    pub fn with_static(
        a: ParticleHandle,
        body: StaticBody,
        normal: Vector,
        penetration: Real,
        point: Point,
    ) -> Self {
        Self {
            a,
            b: ContactBody::Static(body),
            normal,
            penetration,
            points: vec![point],
        }
    }

    /// Both handles when B is a particle.
    pub fn particle_pair(&self) -> Option<(ParticleHandle, ParticleHandle)> {
        match self.b {
            ContactBody::Particle(b) => Some((self.a, b)),
            ContactBody::Static(_) => None,
        }
    }

    /// Exchanges A and B and flips the normal. Static contacts keep the
    /// particle on side A and are left untouched; returns whether a swap happened.
    pub fn swap(&mut self) -> bool {
        match self.b {
            ContactBody::Particle(b) => {
                self.b = ContactBody::Particle(self.a);
                self.a = b;
                self.normal = -self.normal;
                true
            }
            ContactBody::Static(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Particle, ParticleSet};
    use crate::math::{vector, zero_vector};

    #[test]
    fn swap_flips_particle_contacts_only() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::new(zero_vector(), 1.0, 1.0).unwrap());
        let b = set.insert(Particle::new(vector(1.5, 0.0), 1.0, 1.0).unwrap());

        let mut contact = Contact::between_particles(a, b, Vector::X, 0.5, vector(0.75, 0.0));
        assert!(contact.swap());
        assert_eq!(contact.particle_pair(), Some((b, a)));
        assert_eq!(contact.normal, -Vector::X);

        let mut wall =
            Contact::with_static(a, StaticBody::default(), Vector::Y, 0.1, zero_vector());
        assert!(!wall.swap());
        assert_eq!(wall.a, a);
        assert_eq!(wall.normal, Vector::Y);
        assert!(wall.particle_pair().is_none());
    }
}
