//! Playfield bounds and wall reflection
//!
//! Runs after the solver passes. Movable bodies are kept fully inside
//! the field: the valid center range on each axis is radius-aware, and
//! a crossing reflects the perpendicular velocity component.

use serde::{Deserialize, Serialize};

use super::body::{Body, Modifier};
use super::modifier::ModifierSet;
use super::velocity::VelocityStore;

/// Playfield dimensions in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Dimensions are floored at 1x1; non-finite input falls back to that
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Clamp and reflect every movable, non-frozen body at the field edges
pub fn apply_bounds(
    bodies: &mut [Body],
    velocities: &mut VelocityStore,
    modifiers: &ModifierSet,
    field: Playfield,
) {
    for body in bodies.iter_mut() {
        if !body.kind.is_movable() || modifiers.has(body.id, Modifier::Frozen) {
            continue;
        }
        let mut vel = velocities.get(body.id);
        let bounced_x = clamp_axis(&mut body.pos.x, &mut vel.x, body.radius, field.width);
        let bounced_y = clamp_axis(&mut body.pos.y, &mut vel.y, body.radius, field.height);
        if bounced_x || bounced_y {
            velocities.set(body.id, vel);
        }
    }
}

/// Keep one axis inside `[radius, extent - radius]`
///
/// Velocity is negated only when it points out through the crossed edge,
/// so a body held against a wall by its neighbors does not flip its
/// velocity every frame. A field too small for the body centers it.
fn clamp_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) -> bool {
    let lo = radius;
    let hi = extent - radius;
    if hi < lo {
        *pos = extent * 0.5;
        return false;
    }
    if *pos < lo {
        *pos = lo;
        if *vel < 0.0 {
            *vel = -*vel;
            return true;
        }
    } else if *pos > hi {
        *pos = hi;
        if *vel > 0.0 {
            *vel = -*vel;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyKind;
    use glam::Vec2;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0)
    }

    #[test]
    fn test_left_wall_reflects_and_clamps() {
        let mut bodies = vec![Body::new(1, BodyKind::FreeDot, Vec2::new(-3.0, 300.0), 10.0)];
        let mut store = VelocityStore::new();
        store.set(1, Vec2::new(-50.0, 20.0));
        let mods = ModifierSet::new();

        apply_bounds(&mut bodies, &mut store, &mods, field());

        // Edge sits exactly on the boundary
        assert_eq!(bodies[0].pos, Vec2::new(10.0, 300.0));
        assert_eq!(store.get(1), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn test_bottom_wall_reflects_and_clamps() {
        let mut bodies = vec![Body::new(1, BodyKind::Ball, Vec2::new(400.0, 598.0), 8.0)];
        let mut store = VelocityStore::new();
        store.set(1, Vec2::new(0.0, 120.0));
        let mods = ModifierSet::new();

        apply_bounds(&mut bodies, &mut store, &mods, field());

        assert_eq!(bodies[0].pos, Vec2::new(400.0, 592.0));
        assert_eq!(store.get(1), Vec2::new(0.0, -120.0));
    }

    #[test]
    fn test_inward_velocity_is_not_flipped() {
        // Pinned outside the right edge but already moving back in
        let mut bodies = vec![Body::new(1, BodyKind::FreeDot, Vec2::new(795.0, 300.0), 10.0)];
        let mut store = VelocityStore::new();
        store.set(1, Vec2::new(-30.0, 0.0));
        let mods = ModifierSet::new();

        apply_bounds(&mut bodies, &mut store, &mods, field());

        assert_eq!(bodies[0].pos.x, 790.0);
        assert_eq!(store.get(1), Vec2::new(-30.0, 0.0));
    }

    #[test]
    fn test_interior_body_is_untouched() {
        let mut bodies = vec![Body::new(1, BodyKind::FreeDot, Vec2::new(400.0, 300.0), 10.0)];
        let mut store = VelocityStore::new();
        store.set(1, Vec2::new(5.0, 5.0));
        let mods = ModifierSet::new();

        apply_bounds(&mut bodies, &mut store, &mods, field());

        assert_eq!(bodies[0].pos, Vec2::new(400.0, 300.0));
        assert_eq!(store.get(1), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_frozen_and_static_bodies_are_skipped() {
        let mut bodies = vec![
            Body::new(1, BodyKind::FreeDot, Vec2::new(-40.0, 300.0), 10.0),
            Body::new(2, BodyKind::Bumper, Vec2::new(-40.0, 100.0), 10.0),
        ];
        let mut store = VelocityStore::new();
        let mut mods = ModifierSet::new();
        mods.set(1, Modifier::Frozen, true);

        apply_bounds(&mut bodies, &mut store, &mods, field());

        // Frozen dot and static bumper stay where they were placed
        assert_eq!(bodies[0].pos, Vec2::new(-40.0, 300.0));
        assert_eq!(bodies[1].pos, Vec2::new(-40.0, 100.0));
    }

    #[test]
    fn test_too_small_field_centers_the_body() {
        let tiny = Playfield::new(12.0, 600.0);
        let mut bodies = vec![Body::new(1, BodyKind::FreeDot, Vec2::new(1.0, 300.0), 10.0)];
        let mut store = VelocityStore::new();
        store.set(1, Vec2::new(-5.0, 0.0));
        let mods = ModifierSet::new();

        apply_bounds(&mut bodies, &mut store, &mods, tiny);

        // Valid range [10, 2] is empty on x, so the body is centered there
        assert_eq!(bodies[0].pos.x, 6.0);
        assert_eq!(bodies[0].pos.y, 300.0);
    }

    #[test]
    fn test_playfield_sanitizes_input() {
        let field = Playfield::new(f32::NAN, -100.0);
        assert_eq!(field.width, 1.0);
        assert_eq!(field.height, 1.0);
    }
}
