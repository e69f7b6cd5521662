use crate::config::constants::EPSILON;
use crate::containers::Container;
use crate::core::{Contact, Particle, ParticleHandle, StaticBody};
use crate::error::{PhysicsError, Result};
use crate::math::{Point, Real, Vector};

/// Circular boundary confining particles to its interior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleContainer {
    center: Point,
    radius: Real,
    material: StaticBody,
}

impl CircleContainer {
    pub fn new(center: Point, radius: Real) -> Result<Self> {
        if !center.is_finite() || !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidBounds);
        }
        Ok(Self {
            center,
            radius,
            material: StaticBody::default(),
        })
    }

    pub fn with_material(mut self, material: StaticBody) -> Self {
        self.material = material;
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> Real {
        self.radius
    }
}

impl Container for CircleContainer {
    fn generate_contacts(
        &self,
        handle: ParticleHandle,
        particle: &Particle,
        out: &mut Vec<Contact>,
    ) {
        let delta = particle.position - self.center;
        let dist = delta.length();

        // At the center no direction is defined. The particle only touches
        // the wall if it is wider than the container.
        let normal = if dist < EPSILON { Vector::X } else { delta / dist };
        let dist = if dist < EPSILON { 0.0 } else { dist };

        let penetration = dist + particle.radius - self.radius;
        if !(penetration > 0.0) {
            return;
        }

        out.push(Contact::with_static(
            handle,
            self.material,
            normal,
            penetration,
            self.center + normal * self.radius,
        ));
    }
}
