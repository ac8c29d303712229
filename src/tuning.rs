//! Runtime-adjustable physics constants
//!
//! Everything a settings panel would expose lives here, with defaults
//! matching the stock playfield feel. Values are sanitized on the way
//! into a `World` so a bad slider or snapshot cannot wedge the solver.

use serde::{Deserialize, Serialize};

/// Solver and integrator knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Bounciness of collisions, 0 (inelastic) to 1 (elastic)
    pub restitution: f32,
    /// Per-step velocity retention for bodies without `NoFriction`
    pub friction_factor: f32,
    /// Resolution passes per frame; more passes settle dense piles better
    pub solver_passes: u32,
    /// Fraction of the remaining radius gap covered per step
    pub growth_easing: f32,
    /// Hard floor for body radii
    pub min_radius: f32,
    /// Impulse scale for bodies carrying the `Boosted` modifier
    pub boost_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction_factor: 0.99,
            solver_passes: 4,
            growth_easing: 0.2,
            min_radius: 0.5,
            boost_factor: 1.75,
        }
    }
}

impl Tuning {
    /// Clamp every knob into its working range
    ///
    /// Non-finite values fall back to the default for that knob.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let or_default = |v: f32, d: f32| if v.is_finite() { v } else { d };
        Self {
            restitution: or_default(self.restitution, defaults.restitution).clamp(0.0, 1.0),
            friction_factor: or_default(self.friction_factor, defaults.friction_factor)
                .clamp(0.0, 1.0),
            solver_passes: self.solver_passes.clamp(1, 32),
            growth_easing: or_default(self.growth_easing, defaults.growth_easing)
                .clamp(0.01, 1.0),
            min_radius: or_default(self.min_radius, defaults.min_radius).max(0.05),
            boost_factor: or_default(self.boost_factor, defaults.boost_factor).clamp(1.0, 10.0),
        }
    }
}
