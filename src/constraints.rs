use crate::config::constants::{CONSTRAINT_TOLERANCE, EPSILON};
use crate::core::{ParticleHandle, ParticleSet};
use crate::error::{PhysicsError, Result};
use crate::math::Real;

/// Relationship between particles, enforced inside the solver iterations.
///
/// Constraints are owned by the scene and are never removed automatically.
/// Once an endpoint is gone its handle goes stale and `solve` does nothing.
pub trait Constraint: Send + Sync {
    fn solve(&mut self, particles: &mut ParticleSet, dt: Real);

    fn bodies(&self) -> &[ParticleHandle];
}

/// Keeps two particles at a fixed center distance
///
/// The correction is shared according to inverse mass so a static endpoint
/// acts as an anchor. `stiffness` in [0, 1] scales each correction (1.0 is
/// rigid). Moved particles get the displacement added to their velocity so
/// later stages see a consistent motion.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    bodies: [ParticleHandle; 2],
    distance: Real,
    stiffness: Real,
}

impl DistanceConstraint {
    pub fn new(a: ParticleHandle, b: ParticleHandle, distance: Real, stiffness: Real) -> Self {
        Self {
            bodies: [a, b],
            distance: distance.max(0.0),
            stiffness: stiffness.clamp(0.0, 1.0),
        }
    }

    /// Constraint whose rest length is the current separation.
    pub fn from_current(
        particles: &ParticleSet,
        a: ParticleHandle,
        b: ParticleHandle,
        stiffness: Real,
    ) -> Result<Self> {
        let pa = particles.get(a).ok_or(PhysicsError::UnknownParticle(a))?;
        let pb = particles.get(b).ok_or(PhysicsError::UnknownParticle(b))?;
        Ok(Self::new(a, b, pa.position.distance(pb.position), stiffness))
    }

    pub fn distance(&self) -> Real {
        self.distance
    }

    pub fn stiffness(&self) -> Real {
        self.stiffness
    }

    /// Signed stretch (positive when too long), `None` if an endpoint is gone.
    pub fn error(&self, particles: &ParticleSet) -> Option<Real> {
        let [a, b] = self.bodies;
        let pa = particles.get(a)?;
        let pb = particles.get(b)?;
        Some(pa.position.distance(pb.position) - self.distance)
    }
}

impl Constraint for DistanceConstraint {
    fn solve(&mut self, particles: &mut ParticleSet, dt: Real) {
        let [a, b] = self.bodies;
        let Some((pa, pb)) = particles.get2_mut(a, b) else {
            return;
        };
        if !pa.is_alive() || !pb.is_alive() {
            return;
        }

        let delta = pb.position - pa.position;
        let current = delta.length();
        if current < EPSILON {
            return;
        }

        let error = current - self.distance;
        if error.abs() < CONSTRAINT_TOLERANCE {
            return;
        }

        let inv_mass_sum = pa.inv_mass() + pb.inv_mass();
        if inv_mass_sum == 0.0 {
            return;
        }

        let correction = delta / current * (error * self.stiffness);
        let backfill = dt > EPSILON;

        for (particle, sign) in [(pa, 1.0), (pb, -1.0)] {
            let weight = sign * particle.inv_mass() / inv_mass_sum;
            if weight == 0.0 {
                continue;
            }
            if particle.is_sleeping() {
                particle.wake();
            }
            let displacement = correction * weight;
            particle.position += displacement;
            if backfill {
                particle.velocity += displacement / dt;
            }
        }
    }

    fn bodies(&self) -> &[ParticleHandle] {
        &self.bodies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Particle;
    use crate::math::{vector, zero_vector};

    #[test]
    fn equal_masses_meet_halfway_with_velocity_signature() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::new(vector(0.0, 0.0), 1.0, 1.0).unwrap());
        let b = set.insert(Particle::new(vector(12.0, 0.0), 1.0, 1.0).unwrap());

        let mut constraint = DistanceConstraint::new(a, b, 10.0, 1.0);
        constraint.solve(&mut set, 0.5);

        let (pa, pb) = (set.get(a).unwrap(), set.get(b).unwrap());
        assert!((pa.position - vector(1.0, 0.0)).length() < 1e-12);
        assert!((pb.position - vector(11.0, 0.0)).length() < 1e-12);
        assert!((pa.velocity - vector(2.0, 0.0)).length() < 1e-12);
        assert!((pb.velocity - vector(-2.0, 0.0)).length() < 1e-12);
        assert!(constraint.error(&set).unwrap().abs() < 1e-12);
    }

    #[test]
    fn static_anchor_does_not_move() {
        let mut set = ParticleSet::new();
        let anchor = set.insert(Particle::fixed(vector(0.0, 0.0), 1.0).unwrap());
        let bob = set.insert(Particle::new(vector(0.0, -8.0), 1.0, 2.0).unwrap());

        let mut constraint = DistanceConstraint::new(anchor, bob, 5.0, 1.0);
        constraint.solve(&mut set, 1.0 / 60.0);

        assert_eq!(set.get(anchor).unwrap().position, zero_vector());
        assert!((set.get(bob).unwrap().position - vector(0.0, -5.0)).length() < 1e-12);
    }

    #[test]
    fn stiffness_is_clamped_and_scales_correction() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::fixed(vector(0.0, 0.0), 1.0).unwrap());
        let b = set.insert(Particle::new(vector(4.0, 0.0), 1.0, 1.0).unwrap());

        assert_eq!(DistanceConstraint::new(a, b, 2.0, 7.0).stiffness(), 1.0);

        let mut soft = DistanceConstraint::new(a, b, 2.0, 0.5);
        soft.solve(&mut set, 0.0);
        let pb = set.get(b).unwrap();
        assert!((pb.position.x - 3.0).abs() < 1e-12);
        // No velocity backfill without a usable timestep.
        assert_eq!(pb.velocity, zero_vector());
    }

    #[test]
    fn sleeping_endpoint_is_woken_and_stale_handles_are_ignored() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::fixed(vector(0.0, 0.0), 1.0).unwrap());
        let b = set.insert(Particle::new(vector(3.0, 0.0), 1.0, 1.0).unwrap());
        set.get_mut(b).unwrap().put_to_sleep();

        let mut constraint = DistanceConstraint::from_current(&set, a, b, 1.0).unwrap();
        assert!((constraint.distance() - 3.0).abs() < 1e-12);
        set.get_mut(b).unwrap().position.x = 5.0;
        constraint.solve(&mut set, 0.1);
        assert!(!set.get(b).unwrap().is_sleeping());

        set.remove(b);
        constraint.solve(&mut set, 0.1);
        assert!(constraint.error(&set).is_none());
        assert_eq!(
            DistanceConstraint::from_current(&set, a, b, 1.0),
            Err(PhysicsError::UnknownParticle(b))
        );
    }

    #[test]
    fn coincident_endpoints_are_skipped() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::new(vector(1.0, 1.0), 1.0, 1.0).unwrap());
        let b = set.insert(Particle::new(vector(1.0, 1.0), 1.0, 1.0).unwrap());
        let mut constraint = DistanceConstraint::new(a, b, 4.0, 1.0);
        constraint.solve(&mut set, 0.1);
        assert_eq!(set.get(a).unwrap().position, vector(1.0, 1.0));
        assert_eq!(set.get(b).unwrap().position, vector(1.0, 1.0));
    }
}
