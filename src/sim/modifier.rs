//! Modifier membership sets
//!
//! Pure state: one id-set per modifier, O(1) membership queries. Flags
//! are flipped by external triggers (key held while dragging, mode
//! rules) and read by the integrator, solver and impulse path. There is
//! no per-frame update logic here.

use std::collections::HashSet;

use super::body::{BodyId, Modifier};

/// Per-modifier sets of body ids
#[derive(Debug, Clone, Default)]
pub struct ModifierSet {
    no_friction: HashSet<BodyId>,
    boosted: HashSet<BodyId>,
    frozen: HashSet<BodyId>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_of(&self, modifier: Modifier) -> &HashSet<BodyId> {
        match modifier {
            Modifier::NoFriction => &self.no_friction,
            Modifier::Boosted => &self.boosted,
            Modifier::Frozen => &self.frozen,
        }
    }

    fn set_of_mut(&mut self, modifier: Modifier) -> &mut HashSet<BodyId> {
        match modifier {
            Modifier::NoFriction => &mut self.no_friction,
            Modifier::Boosted => &mut self.boosted,
            Modifier::Frozen => &mut self.frozen,
        }
    }

    /// Add or remove `id` from one modifier set
    pub fn set(&mut self, id: BodyId, modifier: Modifier, enabled: bool) {
        let set = self.set_of_mut(modifier);
        if enabled {
            set.insert(id);
        } else {
            set.remove(&id);
        }
    }

    /// Does `id` carry `modifier`?
    #[inline]
    pub fn has(&self, id: BodyId, modifier: Modifier) -> bool {
        self.set_of(modifier).contains(&id)
    }

    /// Remove `id` from every set (called on body destruction)
    pub fn clear_body(&mut self, id: BodyId) {
        self.no_friction.remove(&id);
        self.boosted.remove(&id);
        self.frozen.remove(&id);
    }
}
