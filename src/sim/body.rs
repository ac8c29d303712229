//! Body records and their physics participation rules
//!
//! A body is one circle in the playfield. Everything that moves, bounces,
//! scores or gets destroyed is a body; the `kind` tag decides how the
//! solver treats it and which game mode owns it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable body identifier, assigned at spawn and never reused while alive
pub type BodyId = u32;

/// Which game-mode collection a body belongs to
///
/// The solver is agnostic to kinds except for the participation rules
/// below; everything kind-specific happens in the mode layers after the
/// frame's contacts are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Generic movable dot (chain-reaction field, sandbox)
    FreeDot,
    /// Movable cell inside a cluster blob
    ClusterCell,
    /// Immovable round obstacle (pinball/golf)
    Bumper,
    /// Movable ball (golf ball, pinball ball, cluster striker)
    Ball,
    /// Immovable sensor (golf hole): overlaps are reported, never resolved
    Target,
}

impl BodyKind {
    /// Static bodies never move and never receive impulses
    #[inline]
    pub fn is_static(&self) -> bool {
        matches!(self, BodyKind::Bumper | BodyKind::Target)
    }

    /// Sensors are detected but take no impulse or positional correction
    #[inline]
    pub fn is_sensor(&self) -> bool {
        matches!(self, BodyKind::Target)
    }

    /// Movable bodies integrate, take impulses and get boundary-clamped
    #[inline]
    pub fn is_movable(&self) -> bool {
        !self.is_static()
    }
}

/// Per-body flag altering integrator/solver treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// Exempt from friction decay
    NoFriction,
    /// Impulses applied to this body are scaled up
    Boosted,
    /// Immovable (infinite effective mass) but still collidable
    Frozen,
}

/// One physical circle
///
/// Velocity lives in the `VelocityStore`, not here, so bodies can move
/// between collections without dragging motion state along. Mass is
/// derived from the radius and never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub pos: Vec2,
    /// Current radius, always positive
    pub radius: f32,
    /// Reference radius that mass is derived against
    pub base_radius: f32,
    /// Easing goal for the grow/shrink animation; equals `radius` when idle
    pub target_radius: f32,
}

impl Body {
    pub fn new(id: BodyId, kind: BodyKind, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            base_radius: radius,
            target_radius: radius,
        }
    }

    /// Area-proportional mass: `(radius / base_radius)²`
    #[inline]
    pub fn mass(&self) -> f32 {
        let ratio = self.radius / self.base_radius;
        ratio * ratio
    }

    /// Inverse mass for impulse math; zero means immovable
    #[inline]
    pub fn inv_mass(&self, frozen: bool) -> f32 {
        if frozen || self.kind.is_static() {
            0.0
        } else {
            1.0 / self.mass()
        }
    }

    /// True while the radius is still easing toward its target
    #[inline]
    pub fn animating(&self) -> bool {
        self.radius != self.target_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_is_area_proportional() {
        let mut body = Body::new(1, BodyKind::FreeDot, Vec2::ZERO, 10.0);
        assert_eq!(body.mass(), 1.0);

        // Doubling the radius quadruples the mass, exactly
        body.radius = 20.0;
        assert_eq!(body.mass(), 4.0);

        body.radius = 5.0;
        assert_eq!(body.mass(), 0.25);
    }

    #[test]
    fn test_inv_mass_rules() {
        let dot = Body::new(1, BodyKind::FreeDot, Vec2::ZERO, 10.0);
        assert_eq!(dot.inv_mass(false), 1.0);
        // Frozen acts as infinite mass
        assert_eq!(dot.inv_mass(true), 0.0);

        let bumper = Body::new(2, BodyKind::Bumper, Vec2::ZERO, 10.0);
        assert_eq!(bumper.inv_mass(false), 0.0);

        let hole = Body::new(3, BodyKind::Target, Vec2::ZERO, 10.0);
        assert_eq!(hole.inv_mass(false), 0.0);
    }

    #[test]
    fn test_kind_participation() {
        assert!(BodyKind::FreeDot.is_movable());
        assert!(BodyKind::ClusterCell.is_movable());
        assert!(BodyKind::Ball.is_movable());
        assert!(!BodyKind::Bumper.is_movable());
        assert!(!BodyKind::Target.is_movable());

        assert!(BodyKind::Target.is_sensor());
        assert!(!BodyKind::Bumper.is_sensor());
    }

    #[test]
    fn test_new_body_is_idle() {
        let body = Body::new(7, BodyKind::Ball, Vec2::new(3.0, 4.0), 8.0);
        assert_eq!(body.base_radius, 8.0);
        assert_eq!(body.target_radius, 8.0);
        assert!(!body.animating());
    }
}
