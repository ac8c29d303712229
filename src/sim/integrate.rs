//! Velocity integration, friction decay and radius easing
//!
//! Runs once per fixed step, before the solver passes. Iteration is over
//! the id-ordered registry slice so results are reproducible.

use glam::Vec2;

use super::body::{Body, BodyId, Modifier};
use super::modifier::ModifierSet;
use super::velocity::VelocityStore;
use crate::tuning::Tuning;

/// Radius easing snaps to the target once within this distance
pub const RADIUS_SNAP: f32 = 0.05;

/// Advance every body by one time slice
///
/// Movable, non-frozen bodies move by `velocity * dt` and then decay
/// their velocity by the friction factor unless flagged `NoFriction`.
/// Frozen and static bodies skip both. Radius easing runs for every
/// body regardless. Bodies whose radius has collapsed onto the floor
/// with a collapsed target are appended to `defunct` each step until
/// the caller destroys them.
pub fn integrate(
    bodies: &mut [Body],
    velocities: &mut VelocityStore,
    modifiers: &ModifierSet,
    tuning: &Tuning,
    dt: f32,
    defunct: &mut Vec<BodyId>,
) {
    for body in bodies.iter_mut() {
        if body.kind.is_movable() && !modifiers.has(body.id, Modifier::Frozen) {
            let mut vel = velocities.get(body.id);
            if !vel.is_finite() {
                log::warn!("body {}: non-finite velocity reset to zero", body.id);
                vel = Vec2::ZERO;
            }
            body.pos += vel * dt;
            if !modifiers.has(body.id, Modifier::NoFriction) {
                vel *= tuning.friction_factor;
            }
            velocities.set(body.id, vel);
        }

        ease_radius(body, tuning, defunct);
    }
}

/// Exponential approach of `radius` toward `target_radius`
///
/// Each step covers a fixed fraction of the remaining gap, then snaps
/// once within `RADIUS_SNAP`. The approach is monotonic and never
/// overshoots. The radius is floored at the configured minimum.
fn ease_radius(body: &mut Body, tuning: &Tuning, defunct: &mut Vec<BodyId>) {
    let gap = body.target_radius - body.radius;
    if gap != 0.0 {
        if gap.abs() <= RADIUS_SNAP {
            body.radius = body.target_radius;
        } else {
            body.radius += gap * tuning.growth_easing;
        }
    }
    if body.radius < tuning.min_radius {
        body.radius = tuning.min_radius;
    }
    // A shrink-out that has reached the floor is a destruction candidate
    if body.target_radius <= tuning.min_radius && body.radius <= tuning.min_radius {
        defunct.push(body.id);
    }
}
