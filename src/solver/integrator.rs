//! Velocity Verlet integration with damping and sleep transitions

use crate::config::SolverParams;
use crate::config::constants::MAX_DAMPING;
use crate::core::Particle;
use crate::math::Real;

/// Advances one particle by `dt` from its accumulated force.
///
/// Position uses the previous step's acceleration, velocity uses the
/// average of the previous and new accelerations. The force accumulator is
/// empty afterwards. Dead and sleeping particles are left untouched.
pub fn integrate(particle: &mut Particle, dt: Real, params: &SolverParams) {
    if !particle.is_alive() || particle.is_sleeping() {
        return;
    }

    if particle.is_static() {
        particle.clear_force();
        return;
    }

    let accel_old = particle.acceleration;
    particle.position += particle.velocity * dt + accel_old * (0.5 * dt * dt);

    let accel_new = particle.force * particle.inv_mass();
    particle.acceleration = accel_new;
    particle.velocity += (accel_old + accel_new) * (0.5 * dt);

    if particle.damping > 0.0 {
        let damping = particle.damping.min(MAX_DAMPING);
        particle.velocity *= (1.0 - damping).powf(dt);
    }

    let threshold = particle.sleep_threshold;
    if particle.velocity.length_squared() < threshold * threshold {
        particle.sleep_timer += dt;
        if particle.sleep_timer >= params.sleep_delay {
            // Force, velocity and acceleration are zeroed here.
            particle.put_to_sleep();
            return;
        }
    } else {
        particle.sleep_timer = 0.0;
    }

    particle.clear_force();
}
