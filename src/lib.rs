//! Dotfield - a deterministic 2D circle-physics playground
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, impulse collisions, bounds)
//! - `modes`: Game layers built on the contact reports (chain, golf, pinball, cluster)
//! - `scene`: Snapshot capture and restore
//! - `tuning`: Data-driven physics balance

pub mod modes;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use scene::SceneSnapshot;
pub use tuning::Tuning;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Elapsed real time beyond this is dropped, not simulated
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Default dot radius; body mass is relative to this size
    pub const DOT_RADIUS: f32 = 10.0;
}

/// Whether two circles overlap (touching exactly does not count)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_r: f32, b_pos: Vec2, b_r: f32) -> bool {
    let sum = a_r + b_r;
    a_pos.distance_squared(b_pos) < sum * sum
}

/// Unit vector at `theta` radians from the positive x axis
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
