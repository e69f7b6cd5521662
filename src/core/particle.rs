//! Circular point masses
//!
//! Particles carry position, velocity, accumulated force, mass, material
//! properties and sleep state. No rotation.

use crate::config::constants;
use crate::error::{PhysicsError, Result};
use crate::geometry::Aabb;
use crate::math::{Point, Real, Vector, zero_vector};

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vector,
    /// Acceleration from the previous step (Velocity Verlet)
    pub acceleration: Vector,
    /// Force accumulator, cleared by the integrator
    pub force: Vector,
    pub radius: Real,
    mass: Real,
    inv_mass: Real,

    pub friction: Real,
    pub restitution: Real,
    pub damping: Real,
    pub sleep_threshold: Real,

    alive: bool,
    sleeping: bool,
    pub sleep_timer: Real,
}

impl Particle {
    /// Dynamic particle. `mass` may be `Real::INFINITY` for an immovable one.
    pub fn new(position: Point, radius: Real, mass: Real) -> Result<Self> {
        if !(mass > 0.0) {
            return Err(PhysicsError::NonPositiveMass { mass });
        }
        let inv_mass = 1.0 / mass;
        if !inv_mass.is_finite() {
            return Err(PhysicsError::MassTooSmall { mass });
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(PhysicsError::InvalidRadius { radius });
        }

        Ok(Self {
            position,
            velocity: zero_vector(),
            acceleration: zero_vector(),
            force: zero_vector(),
            radius,
            mass,
            inv_mass,
            friction: constants::DEFAULT_FRICTION,
            restitution: constants::DEFAULT_RESTITUTION,
            damping: constants::DEFAULT_DAMPING,
            sleep_threshold: constants::DEFAULT_SLEEP_THRESHOLD,
            alive: true,
            sleeping: false,
            sleep_timer: 0.0,
        })
    }

    /// Immovable particle (infinite mass, zero inverse mass).
    pub fn fixed(position: Point, radius: Real) -> Result<Self> {
        Self::new(position, radius, Real::INFINITY)
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_damping(mut self, damping: Real) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    pub fn with_sleep_threshold(mut self, threshold: Real) -> Self {
        self.sleep_threshold = threshold;
        self
    }

    #[inline(always)]
    pub fn mass(&self) -> Real {
        self.mass
    }

    #[inline(always)]
    pub fn inv_mass(&self) -> Real {
        self.inv_mass
    }

    /// Inverse mass as seen by the contact solver: sleeping particles act as walls.
    #[inline(always)]
    pub fn effective_inv_mass(&self) -> Real {
        if self.sleeping { 0.0 } else { self.inv_mass }
    }

    #[inline(always)]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    #[inline(always)]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline(always)]
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn wake(&mut self) {
        self.sleeping = false;
        self.sleep_timer = 0.0;
    }

    /// Enter the sleep state: motion and accumulated force are zeroed.
    pub fn put_to_sleep(&mut self) {
        self.sleeping = true;
        self.velocity = zero_vector();
        self.force = zero_vector();
        self.acceleration = zero_vector();
    }

    pub fn clear_force(&mut self) {
        self.force = zero_vector();
    }

    pub fn apply_force(&mut self, force: Vector) {
        self.force += force;
    }

    /// Overwrite position from outside the pipeline (interaction tools).
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.wake();
    }

    /// Overwrite velocity from outside the pipeline (interaction tools).
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
        self.wake();
    }

    #[inline(always)]
    pub fn speed(&self) -> Real {
        self.velocity.length()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_circle(self.position, self.radius)
    }

    /// Kills the particle once its state stops being finite.
    #[inline(always)]
    pub fn update_health(&mut self) {
        if !self.position.is_finite()
            || !self.velocity.is_finite()
            || !self.acceleration.is_finite()
        {
            self.alive = false;
        }
    }
}
