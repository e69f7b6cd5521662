//! Regional fluid forces acting on the part of a particle that lies inside a
//! horizontal band of fluid.

use crate::core::Particle;
use crate::forces::Force;
use crate::geometry::Aabb;
use crate::math::{Real, vector};

/// Area of a disc of radius `radius` lying below a horizontal line at
/// signed offset `offset` from its center.
fn area_below(radius: Real, offset: Real) -> Real {
    let d = offset.clamp(-radius, radius);
    let r_sq = radius * radius;
    r_sq * (-d / radius).clamp(-1.0, 1.0).acos() + d * (r_sq - d * d).max(0.0).sqrt()
}

/// Exact area of the particle disc between `region.min.y` and
/// `region.max.y`. The horizontal extent of the region is not considered.
pub fn submerged_area(region: &Aabb, particle: &Particle) -> Real {
    let r = particle.radius;
    let cy = particle.position.y;
    (area_below(r, region.max.y - cy) - area_below(r, region.min.y - cy)).max(0.0)
}

fn in_fluid_band(region: &Aabb, particle: &Particle) -> bool {
    let p = particle.position;
    p.x >= region.min.x
        && p.x <= region.max.x
        && p.y - particle.radius < region.max.y
        && p.y + particle.radius > region.min.y
}

/// Archimedes' principle: upward force equal to the weight of displaced fluid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuoyancyForce {
    /// Fluid body, `max.y` is the surface
    pub region: Aabb,
    pub fluid_density: Real,
    pub gravity_magnitude: Real,
}

impl BuoyancyForce {
    pub fn new(region: Aabb, fluid_density: Real, gravity_magnitude: Real) -> Self {
        Self {
            region,
            fluid_density,
            gravity_magnitude: gravity_magnitude.abs(),
        }
    }
}

impl Force for BuoyancyForce {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        if particle.is_static() || !self.is_in_region(particle) {
            return;
        }
        let area = submerged_area(&self.region, particle);
        particle.apply_force(vector(
            0.0,
            self.fluid_density * area * self.gravity_magnitude,
        ));
    }

    fn is_in_region(&self, particle: &Particle) -> bool {
        in_fluid_band(&self.region, particle)
    }
}

/// Viscous drag proportional to the submerged area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterDragForce {
    pub region: Aabb,
    pub fluid_density: Real,
    pub coefficient: Real,
}

impl WaterDragForce {
    pub fn new(region: Aabb, fluid_density: Real, coefficient: Real) -> Self {
        Self {
            region,
            fluid_density,
            coefficient,
        }
    }
}

impl Force for WaterDragForce {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        if !self.is_in_region(particle) {
            return;
        }
        let area = submerged_area(&self.region, particle);
        particle.apply_force(-self.coefficient * self.fluid_density * area * particle.velocity);
    }

    fn is_in_region(&self, particle: &Particle) -> bool {
        in_fluid_band(&self.region, particle)
    }
}
