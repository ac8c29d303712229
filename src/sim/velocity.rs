//! Velocity side-map, decoupled from body records
//!
//! Keeping velocities out of the `Body` struct lets bodies be created and
//! destroyed across heterogeneous collections without losing or
//! duplicating motion state. A missing entry reads as the zero vector.
//! The map is never iterated; every sweep walks the id-ordered registry,
//! so map ordering cannot leak into simulation results.

use std::collections::HashMap;

use glam::Vec2;

use super::body::BodyId;

/// Map from body id to current velocity
#[derive(Debug, Clone, Default)]
pub struct VelocityStore {
    map: HashMap<BodyId, Vec2>,
}

impl VelocityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current velocity, zero for unknown ids
    #[inline]
    pub fn get(&self, id: BodyId) -> Vec2 {
        self.map.get(&id).copied().unwrap_or(Vec2::ZERO)
    }

    #[inline]
    pub fn set(&mut self, id: BodyId, vel: Vec2) {
        self.map.insert(id, vel);
    }

    /// Drop the entry for a destroyed body
    pub fn remove(&mut self, id: BodyId) -> Option<Vec2> {
        self.map.remove(&id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.map.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
