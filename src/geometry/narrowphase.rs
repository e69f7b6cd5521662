use crate::config::constants::EPSILON;
use crate::core::{Contact, Particle, ParticleHandle};
use crate::math::Vector;

/// Exact circle-circle overlap test.
///
/// Coincident centers get a fixed `+X` normal with the full radius sum as
/// penetration. Pairs of static particles never produce a contact.
pub fn circle_circle(
    handle_a: ParticleHandle,
    a: &Particle,
    handle_b: ParticleHandle,
    b: &Particle,
) -> Option<Contact> {
    let delta = b.position - a.position;
    let dist_sq = delta.length_squared();
    let radius_sum = a.radius + b.radius;

    // Written negated so a NaN distance is rejected.
    if !(dist_sq < radius_sum * radius_sum) {
        return None;
    }
    if a.is_static() && b.is_static() {
        return None;
    }

    let distance = dist_sq.sqrt();
    if distance < EPSILON {
        return Some(Contact::between_particles(
            handle_a,
            handle_b,
            Vector::X,
            radius_sum,
            a.position,
        ));
    }

    let normal = delta / distance;
    let penetration = radius_sum - distance;
    let point = a.position + normal * (a.radius - penetration * 0.5);

    Some(Contact::between_particles(
        handle_a,
        handle_b,
        normal,
        penetration,
        point,
    ))
}
