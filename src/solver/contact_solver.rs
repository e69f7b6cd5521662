//! Impulse-based contact response and Baumgarte positional correction
//!
//! `resolve_contact` runs once per contact in every solver iteration.
//! `positional_correction` runs once per contact after the last iteration.

use crate::config::SolverParams;
use crate::config::constants::EPSILON;
use crate::core::{Contact, ContactBody, Particle, ParticleSet, StaticBody};
use crate::math::{Real, Vector, zero_vector};

/// Side B of a contact: another particle or an immovable static body.
enum Partner<'a> {
    Particle(&'a mut Particle),
    Static(StaticBody),
}

impl Partner<'_> {
    fn is_alive(&self) -> bool {
        match self {
            Partner::Particle(p) => p.is_alive(),
            Partner::Static(_) => true,
        }
    }

    fn velocity(&self) -> Vector {
        match self {
            Partner::Particle(p) => p.velocity,
            Partner::Static(_) => zero_vector(),
        }
    }

    fn inv_mass(&self) -> Real {
        match self {
            Partner::Particle(p) => p.inv_mass(),
            Partner::Static(_) => 0.0,
        }
    }

    fn effective_inv_mass(&self) -> Real {
        match self {
            Partner::Particle(p) => p.effective_inv_mass(),
            Partner::Static(_) => 0.0,
        }
    }

    fn restitution(&self) -> Real {
        match self {
            Partner::Particle(p) => p.restitution,
            Partner::Static(body) => body.restitution,
        }
    }

    fn friction(&self) -> Real {
        match self {
            Partner::Particle(p) => p.friction,
            Partner::Static(body) => body.friction,
        }
    }

    fn particle_mut(&mut self) -> Option<&mut Particle> {
        match self {
            Partner::Particle(p) => Some(&mut **p),
            Partner::Static(_) => None,
        }
    }
}

fn bodies<'a>(
    particles: &'a mut ParticleSet,
    contact: &Contact,
) -> Option<(&'a mut Particle, Partner<'a>)> {
    match contact.b {
        ContactBody::Particle(b) => {
            let (pa, pb) = particles.get2_mut(contact.a, b)?;
            Some((pa, Partner::Particle(pb)))
        }
        ContactBody::Static(body) => Some((particles.get_mut(contact.a)?, Partner::Static(body))),
    }
}

fn wake_dynamic(particle: &mut Particle) {
    if particle.is_sleeping() && particle.inv_mass() > 0.0 {
        particle.wake();
    }
}

/// Velocity response for one contact: restitution impulse along the normal,
/// then Coulomb friction along the tangent.
///
/// Sleeping particles are only woken by a significant collision. One that
/// stays asleep takes part as an immovable body.
pub fn resolve_contact(particles: &mut ParticleSet, contact: &Contact, params: &SolverParams) {
    let Some((a, mut b)) = bodies(particles, contact) else {
        return;
    };
    if !a.is_alive() || !b.is_alive() {
        return;
    }
    if a.inv_mass() == 0.0 && b.inv_mass() == 0.0 {
        return;
    }

    let normal = contact.normal;
    let vel_along_normal = (b.velocity() - a.velocity).dot(normal);
    // Separating (or NaN): nothing to resolve.
    if !(vel_along_normal <= 0.0) {
        return;
    }
    let closing_speed = -vel_along_normal;

    let significant = closing_speed > params.wake_velocity_threshold
        || contact.penetration > params.wake_penetration_threshold;
    if significant {
        wake_dynamic(a);
        if let Some(pb) = b.particle_mut() {
            wake_dynamic(pb);
        }
    }

    let inv_mass_a = a.effective_inv_mass();
    let inv_mass_b = b.effective_inv_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum == 0.0 {
        return;
    }

    let restitution = if closing_speed < params.resting_velocity_threshold {
        0.0
    } else {
        a.restitution.min(b.restitution())
    };

    let j = -(1.0 + restitution) * vel_along_normal / inv_mass_sum;
    let impulse = normal * j;
    a.velocity -= impulse * inv_mass_a;
    if let Some(pb) = b.particle_mut() {
        pb.velocity += impulse * inv_mass_b;
    }

    // Near-resting contacts get no friction.
    if closing_speed < params.friction_min_normal_speed {
        return;
    }

    let rv = b.velocity() - a.velocity;
    let tangent = rv - normal * rv.dot(normal);
    let tangent_len_sq = tangent.length_squared();
    if tangent_len_sq < EPSILON * EPSILON {
        return;
    }
    let tangent = tangent / tangent_len_sq.sqrt();

    let mu = (a.friction * b.friction()).sqrt();
    let max_friction = (j * mu).max(0.0);
    let jt = (-rv.dot(tangent) / inv_mass_sum).clamp(-max_friction, max_friction);

    let friction_impulse = tangent * jt;
    a.velocity -= friction_impulse * inv_mass_a;
    if let Some(pb) = b.particle_mut() {
        pb.velocity += friction_impulse * inv_mass_b;
    }
}

/// Pushes overlapping bodies apart along the normal, sharing the
/// displacement by inverse mass. Penetration up to `slop` is left alone.
pub fn positional_correction(
    particles: &mut ParticleSet,
    contact: &Contact,
    params: &SolverParams,
) {
    let Some((a, mut b)) = bodies(particles, contact) else {
        return;
    };
    if !a.is_alive() || !b.is_alive() {
        return;
    }

    let inv_mass_a = a.effective_inv_mass();
    let inv_mass_b = b.effective_inv_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum == 0.0 {
        return;
    }

    // Clamp the total separation, then share it by inverse mass.
    let separation = ((contact.penetration - params.slop).max(0.0) * params.correction_percent)
        .min(params.max_correction);
    if !(separation > 0.0) {
        return;
    }

    let correction = contact.normal * (separation / inv_mass_sum);
    let bleed = params.velocity_bleed;

    let offset_a = -correction * inv_mass_a;
    a.position += offset_a;
    if bleed > 0.0 {
        a.velocity += offset_a * bleed;
    }

    if let Some(pb) = b.particle_mut() {
        let offset_b = correction * inv_mass_b;
        pb.position += offset_b;
        if bleed > 0.0 {
            pb.velocity += offset_b * bleed;
        }
    }
}
