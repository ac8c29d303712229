//! Pairwise impulse collision solver
//!
//! The tricky part of the playfield: many overlapping circles of mixed
//! mass, some immovable, some mid-animation, all resolved in real time.
//! The approach is a fixed number of resolution passes per frame; each
//! pass sweeps all pairs in ascending-id order, exchanges a restitution
//! impulse weighted by inverse mass, and pushes the pair fully apart.
//! A fixed pass count trades exactness for predictable cost; iterating
//! more than a few times yields no visible improvement.

use glam::Vec2;

use super::body::{Body, BodyId, Modifier};
use super::modifier::ModifierSet;
use super::velocity::VelocityStore;
use crate::tuning::Tuning;

/// Unordered contact between two bodies, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ContactPair {
    pub a: BodyId,
    pub b: BodyId,
}

impl ContactPair {
    pub fn new(x: BodyId, y: BodyId) -> Self {
        if x <= y { Self { a: x, b: y } } else { Self { a: y, b: x } }
    }

    /// If `id` is one side of the pair, return the other side
    #[inline]
    pub fn partner_of(&self, id: BodyId) -> Option<BodyId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Run the configured number of resolution passes over all pairs
///
/// Returns every pair that overlapped at any point during the frame,
/// sorted ascending and deduplicated. Sensor overlaps are reported but
/// not resolved; static-static pairs are skipped outright.
pub fn solve(
    bodies: &mut [Body],
    velocities: &mut VelocityStore,
    modifiers: &ModifierSet,
    tuning: &Tuning,
) -> Vec<ContactPair> {
    let mut contacts = Vec::new();
    for _ in 0..tuning.solver_passes {
        resolve_pass(bodies, velocities, modifiers, tuning, &mut contacts);
    }
    contacts.sort_unstable();
    contacts.dedup();
    contacts
}

/// One sweep over all unordered pairs in ascending-id order
fn resolve_pass(
    bodies: &mut [Body],
    velocities: &mut VelocityStore,
    modifiers: &ModifierSet,
    tuning: &Tuning,
    contacts: &mut Vec<ContactPair>,
) {
    let count = bodies.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (head, tail) = bodies.split_at_mut(j);
            resolve_pair(
                &mut head[i],
                &mut tail[0],
                velocities,
                modifiers,
                tuning,
                contacts,
            );
        }
    }
}

/// Detect and resolve one pair
fn resolve_pair(
    a: &mut Body,
    b: &mut Body,
    velocities: &mut VelocityStore,
    modifiers: &ModifierSet,
    tuning: &Tuning,
    contacts: &mut Vec<ContactPair>,
) {
    // Neither side can move or be scored against the other
    if a.kind.is_static() && b.kind.is_static() {
        return;
    }

    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    if !dist_sq.is_finite() {
        debug_assert!(false, "non-finite body positions in pair {}/{}", a.id, b.id);
        return;
    }
    let radius_sum = a.radius + b.radius;
    if dist_sq >= radius_sum * radius_sum {
        return;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers get a fixed normal so reruns stay identical
    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
    let overlap = radius_sum - dist;

    contacts.push(ContactPair::new(a.id, b.id));

    // Sensors only report; the pair keeps interpenetrating
    if a.kind.is_sensor() || b.kind.is_sensor() {
        return;
    }

    let inv_a = a.inv_mass(modifiers.has(a.id, Modifier::Frozen));
    let inv_b = b.inv_mass(modifiers.has(b.id, Modifier::Frozen));
    let inv_sum = inv_a + inv_b;
    if inv_sum == 0.0 {
        // Two immovable bodies overlapping: nothing to resolve
        return;
    }

    // An immovable side collides as motionless; a frozen body's banked
    // velocity belongs to its thaw, not to the contact
    let vel_a = if inv_a > 0.0 { velocities.get(a.id) } else { Vec2::ZERO };
    let vel_b = if inv_b > 0.0 { velocities.get(b.id) } else { Vec2::ZERO };

    // Impulse only for approaching or resting contacts; a separating
    // pair must not be accelerated further apart
    let rel_vel = (vel_b - vel_a).dot(normal);
    if rel_vel <= 0.0 {
        let impulse = -(1.0 + tuning.restitution) * rel_vel / inv_sum;
        if inv_a > 0.0 {
            velocities.set(a.id, velocities.get(a.id) - normal * (impulse * inv_a));
        }
        if inv_b > 0.0 {
            velocities.set(b.id, velocities.get(b.id) + normal * (impulse * inv_b));
        }
    }

    // Positional correction: split the full overlap by inverse-mass
    // share, so an immovable partner absorbs none of it
    let push = normal * overlap;
    a.pos -= push * (inv_a / inv_sum);
    b.pos += push * (inv_b / inv_sum);
}
