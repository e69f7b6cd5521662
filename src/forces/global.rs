use crate::config::constants::DEFAULT_GRAVITY;
use crate::core::Particle;
use crate::forces::Force;
use crate::math::{Point, Real, Vector, normalized_or_zero};

/// Uniform gravitational acceleration, `F = m * g`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    pub acceleration: Vector,
}

impl Gravity {
    pub fn new(acceleration: Vector) -> Self {
        Self { acceleration }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl Force for Gravity {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        if particle.is_static() {
            return;
        }
        particle.apply_force(self.acceleration * particle.mass());
    }
}

/// Velocity-proportional drag, `F = -k * v`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearDrag {
    pub coefficient: Real,
}

impl LinearDrag {
    pub fn new(coefficient: Real) -> Self {
        Self { coefficient }
    }
}

impl Force for LinearDrag {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        particle.apply_force(-self.coefficient * particle.velocity);
    }
}

/// Constant push, independent of mass: heavy particles drift less.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindForce {
    pub force: Vector,
}

impl WindForce {
    pub fn new(force: Vector) -> Self {
        Self { force }
    }
}

impl Force for WindForce {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        particle.apply_force(self.force);
    }
}

/// Inverse-square point attractor. A negative strength repels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialForce {
    pub center: Point,
    pub strength: Real,
    /// Distance floor so the force stays bounded near the center
    pub min_radius: Real,
}

impl RadialForce {
    pub fn new(center: Point, strength: Real) -> Self {
        Self {
            center,
            strength,
            min_radius: 1e-4,
        }
    }

    pub fn with_min_radius(mut self, min_radius: Real) -> Self {
        self.min_radius = min_radius.abs();
        self
    }
}

impl Force for RadialForce {
    fn apply(&self, particle: &mut Particle, _dt: Real) {
        if particle.is_static() {
            return;
        }
        let delta = self.center - particle.position;
        let dist_sq = delta.length_squared().max(self.min_radius * self.min_radius);
        particle.apply_force(normalized_or_zero(delta) * (self.strength / dist_sq));
    }
}
