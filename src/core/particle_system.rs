use bevy::prelude::*;

use crate::config::SolverParams;
use crate::constraints::Constraint;
use crate::containers::Container;
use crate::error::{PhysicsError, Result};
use crate::forces::Force;
use crate::geometry::{SpatialHashGrid, circle_circle};
use crate::math::Real;
use crate::solver::{integrate, positional_correction, resolve_contact};

use super::contact::Contact;
use super::particle::Particle;
use super::particle_set::{ParticleHandle, ParticleSet};

/// Counters from the most recent `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub candidate_pairs: usize,
    pub contacts: usize,
    pub removed: usize,
}

/// Owns every particle, force, container and constraint, and runs the
/// per-step pipeline over them.
///
/// Scene edits (adding or removing anything, changing parameters) belong
/// between steps.
#[derive(Resource)]
pub struct ParticleSystem {
    particles: ParticleSet,
    global_forces: Vec<Box<dyn Force>>,
    local_forces: Vec<Box<dyn Force>>,
    containers: Vec<Box<dyn Container>>,
    constraints: Vec<Box<dyn Constraint>>,
    broadphase: SpatialHashGrid,
    contacts: Vec<Contact>,
    params: SolverParams,
    last_stats: StepStats,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            particles: ParticleSet::new(),
            global_forces: Vec::new(),
            local_forces: Vec::new(),
            containers: Vec::new(),
            constraints: Vec::new(),
            broadphase: SpatialHashGrid::default(),
            contacts: Vec::new(),
            params: SolverParams::default(),
            last_stats: StepStats::default(),
        }
    }
}

impl ParticleSystem {
    pub fn new(params: SolverParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            broadphase: SpatialHashGrid::new(params.cell_size)?,
            params,
            ..Self::default()
        })
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleHandle {
        self.particles.insert(particle)
    }

    /// Marks a particle dead; it is removed at the end of the next step.
    pub fn kill(&mut self, handle: ParticleHandle) -> Result<()> {
        self.particles
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownParticle(handle))?
            .kill();
        Ok(())
    }

    pub fn particle(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles.get(handle)
    }

    pub fn particle_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.particles.get_mut(handle)
    }

    pub fn particles(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> {
        self.particles.iter()
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn add_container(&mut self, container: impl Container + 'static) {
        self.containers.push(Box::new(container));
    }

    pub fn clear_containers(&mut self) {
        self.containers.clear();
    }

    pub fn containers(&self) -> &[Box<dyn Container>] {
        &self.containers
    }

    pub fn add_constraint(&mut self, constraint: impl Constraint + 'static) {
        self.constraints.push(Box::new(constraint));
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    /// Applied to every awake particle.
    pub fn add_global_force(&mut self, force: impl Force + 'static) {
        self.global_forces.push(Box::new(force));
    }

    /// Applied only to particles for which `Force::is_in_region` holds.
    pub fn add_local_force(&mut self, force: impl Force + 'static) {
        self.local_forces.push(Box::new(force));
    }

    pub fn clear_forces(&mut self) {
        self.global_forces.clear();
        self.local_forces.clear();
    }

    /// Drops all particles and constraints. Forces and containers stay.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.constraints.clear();
        self.contacts.clear();
        self.broadphase.clear();
        self.last_stats = StepStats::default();
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SolverParams) -> Result<()> {
        params.validate()?;
        if params.cell_size != self.broadphase.cell_size() {
            self.broadphase = SpatialHashGrid::new(params.cell_size)?;
        }
        self.params = params;
        Ok(())
    }

    pub fn last_step_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Contacts generated by the most recent step, in solve order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: Real) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("ignoring particle step with invalid dt {dt}");
            return;
        }

        let Self {
            particles,
            global_forces,
            local_forces,
            containers,
            constraints,
            broadphase,
            contacts,
            params,
            last_stats,
        } = self;

        // Forces
        for (_, particle) in particles.iter_mut() {
            if !particle.is_alive() || particle.is_sleeping() {
                continue;
            }
            for force in global_forces.iter() {
                force.apply(particle, dt);
            }
            for force in local_forces.iter() {
                if force.is_in_region(particle) {
                    force.apply(particle, dt);
                }
            }
        }

        // Integration, then drop anything that went non-finite
        let mut failed = 0;
        for (_, particle) in particles.iter_mut() {
            if !particle.is_alive() {
                continue;
            }
            integrate(particle, dt, params);
            particle.update_health();
            if !particle.is_alive() {
                failed += 1;
            }
        }
        if failed > 0 {
            warn!("{failed} particles reached a non-finite state and were killed");
        }

        // Broadphase
        broadphase.clear();
        for (handle, particle) in particles.iter() {
            if particle.is_alive() {
                broadphase.insert(handle, particle);
            }
        }
        let pairs = broadphase.compute_pairs();

        // Narrowphase
        contacts.clear();
        for &(a, b) in &pairs {
            let (Some(pa), Some(pb)) = (particles.get(a), particles.get(b)) else {
                continue;
            };
            if let Some(contact) = circle_circle(a, pa, b, pb) {
                contacts.push(contact);
            }
        }

        // Containers
        for (handle, particle) in particles.iter() {
            if !particle.is_alive() || particle.is_static() {
                continue;
            }
            for container in containers.iter() {
                container.generate_contacts(handle, particle, contacts);
            }
        }

        for _ in 0..params.solver_iterations {
            for contact in contacts.iter() {
                resolve_contact(particles, contact, params);
            }
            for constraint in constraints.iter_mut() {
                constraint.solve(particles, dt);
            }
        }

        for contact in contacts.iter() {
            positional_correction(particles, contact, params);
        }

        let removed = particles.remove_dead();

        *last_stats = StepStats {
            candidate_pairs: pairs.len(),
            contacts: contacts.len(),
            removed: removed.len(),
        };
        debug!(
            "particle step: {} particles, {} pairs, {} contacts, {} removed",
            particles.len(),
            last_stats.candidate_pairs,
            last_stats.contacts,
            last_stats.removed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::DistanceConstraint;
    use crate::containers::RectangleContainer;
    use crate::forces::{BuoyancyForce, Gravity, WindForce};
    use crate::geometry::Aabb;
    use crate::math::{vector, zero_vector};

    #[test]
    fn new_rejects_invalid_params() {
        assert!(ParticleSystem::new(SolverParams::default().with_cell_size(0.0)).is_err());
        assert!(ParticleSystem::new(SolverParams::default().with_iterations(0)).is_err());

        let mut system = ParticleSystem::default();
        assert!(system.set_params(SolverParams::default().with_cell_size(-1.0)).is_err());
        assert_eq!(system.params(), &SolverParams::default());
        assert!(system.set_params(SolverParams::default().with_cell_size(5.0)).is_ok());
        assert_eq!(system.params().cell_size, 5.0);
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut system = ParticleSystem::default();
        system.add_global_force(Gravity::default());
        let h = system.add_particle(Particle::new(zero_vector(), 1.0, 1.0).unwrap());

        for dt in [0.0, -0.1, Real::NAN, Real::INFINITY] {
            system.step(dt);
        }
        let p = system.particle(h).unwrap();
        assert_eq!(p.position, zero_vector());
        assert_eq!(p.velocity, zero_vector());
    }

    #[test]
    fn killed_particle_is_removed_at_end_of_step() {
        let mut system = ParticleSystem::default();
        let a = system.add_particle(Particle::new(zero_vector(), 1.0, 1.0).unwrap());
        let b = system.add_particle(Particle::new(vector(50.0, 0.0), 1.0, 1.0).unwrap());

        system.kill(a).unwrap();
        assert_eq!(system.particle_count(), 2);
        system.step(1.0 / 60.0);

        assert_eq!(system.particle_count(), 1);
        assert!(system.particle(a).is_none());
        assert!(system.particle(b).is_some());
        assert_eq!(system.last_step_stats().removed, 1);
        assert_eq!(system.kill(a), Err(PhysicsError::UnknownParticle(a)));
    }

    #[test]
    fn local_force_only_acts_inside_region() {
        let mut system = ParticleSystem::default();
        let water = Aabb::new(vector(0.0, 0.0), vector(100.0, 100.0)).unwrap();
        system.add_local_force(BuoyancyForce::new(water, 1.0, 10.0));
        let wet = system.add_particle(Particle::new(vector(50.0, 50.0), 1.0, 1.0).unwrap());
        let dry = system.add_particle(Particle::new(vector(500.0, 50.0), 1.0, 1.0).unwrap());

        system.step(0.1);
        system.step(0.1);
        assert!(system.particle(wet).unwrap().velocity.y > 0.0);
        assert_eq!(system.particle(dry).unwrap().velocity, zero_vector());
    }

    #[test]
    fn sleeping_particles_receive_no_forces() {
        let mut system = ParticleSystem::default();
        system.add_global_force(WindForce::new(vector(100.0, 0.0)));
        let h = system.add_particle(Particle::new(zero_vector(), 1.0, 1.0).unwrap());
        system.particle_mut(h).unwrap().put_to_sleep();

        for _ in 0..10 {
            system.step(1.0 / 60.0);
        }
        let p = system.particle(h).unwrap();
        assert!(p.is_sleeping());
        assert_eq!(p.position, zero_vector());
        assert_eq!(p.velocity, zero_vector());
    }

    #[test]
    fn overlapping_pair_produces_contact_and_stats() {
        let mut system = ParticleSystem::default();
        system.add_particle(Particle::new(vector(0.0, 0.0), 5.0, 1.0).unwrap());
        system.add_particle(Particle::new(vector(8.0, 0.0), 5.0, 1.0).unwrap());
        system.step(1.0 / 60.0);

        let stats = system.last_step_stats();
        assert_eq!(stats.candidate_pairs, 1);
        assert_eq!(stats.contacts, 1);
        assert_eq!(system.contacts().len(), 1);
    }

    #[test]
    fn clear_keeps_forces_and_containers() {
        let mut system = ParticleSystem::default();
        system.add_global_force(Gravity::default());
        system.add_container(RectangleContainer::new(0.0, 0.0, 100.0, 100.0).unwrap());
        let a = system.add_particle(Particle::new(vector(10.0, 10.0), 1.0, 1.0).unwrap());
        let b = system.add_particle(Particle::new(vector(20.0, 10.0), 1.0, 1.0).unwrap());
        system.add_constraint(DistanceConstraint::new(a, b, 10.0, 1.0));

        system.clear();
        assert_eq!(system.particle_count(), 0);
        assert!(system.constraints().is_empty());
        assert_eq!(system.containers().len(), 1);

        system.step(1.0 / 60.0);
        system.clear();
        system.step(1.0 / 60.0);
        assert_eq!(system.particle_count(), 0);
        assert_eq!(system.last_step_stats(), StepStats::default());
    }
}
