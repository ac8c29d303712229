//! Scene snapshots
//!
//! Full-playfield capture and restore, layered on the public `World`
//! surface. The JSON layout mirrors the current types and changes with
//! them; it is a save file, not an interchange format.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Body, BodyId, BodyKind, Modifier, Playfield, World};
use crate::tuning::Tuning;

/// Bumped whenever the snapshot layout changes incompatibly
pub const SNAPSHOT_VERSION: u32 = 1;

/// One body plus the state held for it outside the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub base_radius: f32,
    pub target_radius: f32,
    pub vel: Vec2,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

/// Everything needed to rebuild a `World`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub version: u32,
    pub playfield: Playfield,
    pub tuning: Tuning,
    pub bodies: Vec<BodySnapshot>,
}

impl SceneSnapshot {
    /// Capture the current scene through the snapshot accessors
    pub fn capture(world: &World) -> Self {
        let bodies = world
            .bodies()
            .iter()
            .map(|b| BodySnapshot {
                id: b.id,
                kind: b.kind,
                pos: b.pos,
                radius: b.radius,
                base_radius: b.base_radius,
                target_radius: b.target_radius,
                vel: world.velocity(b.id),
                modifiers: world.modifiers_of(b.id),
            })
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            playfield: world.playfield(),
            tuning: *world.tuning(),
            bodies,
        }
    }

    /// Rebuild a world from this snapshot
    ///
    /// Ids are preserved and the allocator resumes above the highest
    /// restored id, so a restored world steps exactly like the one it
    /// was captured from. Hand-edited input is tolerated: bodies are
    /// re-sorted, duplicate ids collapse to the first entry and bad
    /// geometry, playfield dimensions included, gets the usual
    /// construction sanitizing.
    pub fn restore(&self) -> World {
        if self.version != SNAPSHOT_VERSION {
            log::warn!(
                "snapshot version {} differs from current {}",
                self.version,
                SNAPSHOT_VERSION
            );
        }
        let playfield = Playfield::new(self.playfield.width, self.playfield.height);
        let mut world = World::new(playfield, self.tuning);
        let mut bodies = self.bodies.clone();
        bodies.sort_by_key(|b| b.id);
        bodies.dedup_by_key(|b| b.id);
        for snap in &bodies {
            let mut body = Body::new(snap.id, snap.kind, snap.pos, snap.radius);
            if snap.base_radius.is_finite() && snap.base_radius > 0.0 {
                body.base_radius = snap.base_radius;
            }
            body.target_radius = snap.target_radius;
            world.insert_restored(body, snap.vel, &snap.modifiers);
        }
        log::debug!("scene restored: {} bodies", world.len());
        world
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> World {
        let mut w = World::new(Playfield::new(800.0, 600.0), Tuning::default());
        let dot = w.spawn_with_velocity(
            BodyKind::FreeDot,
            Vec2::new(120.0, 200.0),
            10.0,
            Vec2::new(35.0, -10.0),
        );
        w.set_modifier(dot, Modifier::Boosted, true);
        let anchor = w.spawn(BodyKind::FreeDot, Vec2::new(400.0, 300.0), 14.0);
        w.set_modifier(anchor, Modifier::Frozen, true);
        w.spawn(BodyKind::Bumper, Vec2::new(600.0, 150.0), 22.0);
        let grower = w.spawn(BodyKind::Ball, Vec2::new(250.0, 450.0), 8.0);
        w.set_radius_target(grower, 24.0);
        w
    }

    #[test]
    fn test_round_trip_preserves_scene() {
        let w = sample_world();
        let json = SceneSnapshot::capture(&w).to_json().unwrap();
        let restored = SceneSnapshot::from_json(&json).unwrap().restore();

        assert_eq!(restored.len(), w.len());
        for (orig, back) in w.bodies().iter().zip(restored.bodies()) {
            assert_eq!(orig.id, back.id);
            assert_eq!(orig.kind, back.kind);
            assert_eq!(orig.pos, back.pos);
            assert_eq!(orig.radius, back.radius);
            assert_eq!(orig.base_radius, back.base_radius);
            assert_eq!(orig.target_radius, back.target_radius);
            assert_eq!(w.velocity(orig.id), restored.velocity(back.id));
            assert_eq!(w.modifiers_of(orig.id), restored.modifiers_of(back.id));
        }
    }

    #[test]
    fn test_restored_world_steps_identically() {
        let mut original = sample_world();
        let mut restored = SceneSnapshot::capture(&original).restore();

        for _ in 0..120 {
            original.step_frame(1.0 / 120.0);
            restored.step_frame(1.0 / 120.0);
        }
        for (a, b) in original.bodies().iter().zip(restored.bodies()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(original.velocity(a.id), restored.velocity(b.id));
        }
    }

    #[test]
    fn test_id_allocation_resumes_after_restore() {
        let w = sample_world();
        let top = w.bodies().last().unwrap().id;
        let mut restored = SceneSnapshot::capture(&w).restore();

        let fresh = restored.spawn(BodyKind::FreeDot, Vec2::new(50.0, 50.0), 10.0);
        assert!(fresh > top);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(SceneSnapshot::from_json("not a snapshot").is_err());
        assert!(SceneSnapshot::from_json("{\"version\": 1}").is_err());
    }

    #[test]
    fn test_restore_sanitizes_playfield_dimensions() {
        // A hand-edited save can carry dimensions to_json would never emit
        let mut snap = SceneSnapshot::capture(&sample_world());
        snap.playfield = Playfield {
            width: f32::INFINITY,
            height: -200.0,
        };

        let restored = snap.restore();
        assert_eq!(restored.playfield().width, 1.0);
        assert_eq!(restored.playfield().height, 1.0);
    }

    #[test]
    fn test_restore_tolerates_shuffled_duplicate_bodies() {
        let w = sample_world();
        let mut snap = SceneSnapshot::capture(&w);
        snap.bodies.reverse();
        let dupe = snap.bodies[0].clone();
        snap.bodies.push(dupe);

        let restored = snap.restore();
        assert_eq!(restored.len(), w.len());
        let ids: Vec<_> = restored.bodies().iter().map(|b| b.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
