//! Deterministic simulation core
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - No randomness; seeded RNG belongs to the mode layers that feed it
//! - Stable iteration order (ascending body id)
//! - No rendering or platform dependencies

pub mod body;
pub mod boundary;
pub mod clock;
pub mod integrate;
pub mod modifier;
pub mod solver;
pub mod velocity;
pub mod world;

pub use body::{Body, BodyId, BodyKind, Modifier};
pub use boundary::Playfield;
pub use clock::FrameClock;
pub use modifier::ModifierSet;
pub use solver::ContactPair;
pub use velocity::VelocityStore;
pub use world::{StepReport, World};
