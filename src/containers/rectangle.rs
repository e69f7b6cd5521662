use crate::containers::Container;
use crate::core::{Contact, Particle, ParticleHandle, StaticBody};
use crate::error::{PhysicsError, Result};
use crate::geometry::Aabb;
use crate::math::{Real, Vector, vector};

/// Axis-aligned box confining particles to its interior.
///
/// Each wall is tested independently, so a particle in a corner gets two
/// contacts in the same step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleContainer {
    bounds: Aabb,
    material: StaticBody,
}

impl RectangleContainer {
    /// `(x, y)` is the bottom-left corner.
    pub fn new(x: Real, y: Real, width: Real, height: Real) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) || !(x + width).is_finite() || !(y + height).is_finite()
        {
            return Err(PhysicsError::InvalidBounds);
        }
        let bounds = Aabb::new(vector(x, y), vector(x + width, y + height))?;
        Ok(Self {
            bounds,
            material: StaticBody::default(),
        })
    }

    pub fn with_material(mut self, material: StaticBody) -> Self {
        self.material = material;
        self
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn material(&self) -> StaticBody {
        self.material
    }
}

impl Container for RectangleContainer {
    fn generate_contacts(
        &self,
        handle: ParticleHandle,
        particle: &Particle,
        out: &mut Vec<Contact>,
    ) {
        let p = particle.position;
        let r = particle.radius;
        let Aabb { min, max } = self.bounds;

        let mut push = |normal: Vector, penetration: Real, point: Vector| {
            out.push(Contact::with_static(
                handle,
                self.material,
                normal,
                penetration,
                point,
            ));
        };

        if p.x - r < min.x {
            push(-Vector::X, min.x - (p.x - r), vector(min.x, p.y));
        }
        if p.x + r > max.x {
            push(Vector::X, p.x + r - max.x, vector(max.x, p.y));
        }
        if p.y - r < min.y {
            push(-Vector::Y, min.y - (p.y - r), vector(p.x, min.y));
        }
        if p.y + r > max.y {
            push(Vector::Y, p.y + r - max.y, vector(p.x, max.y));
        }
    }
}
