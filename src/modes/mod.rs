//! Game-mode event layers
//!
//! Modes never reach into the solver. Each one seeds its bodies through
//! the world API, then consumes the per-step report and turns overlaps
//! into outcomes: arming, scoring, destruction, holing out. Layouts
//! draw from a seeded RNG so a given seed always builds the same scene.

pub mod chain;
pub mod cluster;
pub mod golf;
pub mod pinball;

pub use chain::ChainMode;
pub use cluster::ClusterMode;
pub use golf::GolfMode;
pub use pinball::PinballMode;
