//! Chain-reaction mode
//!
//! A field of drifting dots. Igniting one grows it and arms it; any
//! normal dot touching an armed dot arms as well. Armed dots expire
//! after a fixed lifetime, shrink out and are destroyed, counting
//! toward the chain total.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::DOT_RADIUS;
use crate::sim::{BodyId, BodyKind, StepReport, World};
use crate::unit_from_angle;

/// Armed dots stay expanded this many fixed steps
pub const ARMED_LIFETIME_TICKS: u32 = 90;
/// Expansion factor applied to the base radius when a dot arms
pub const ARMED_GROWTH: f32 = 2.6;
/// Drift speed range for seeded dots
const DRIFT_SPEED: (f32, f32) = (20.0, 70.0);

#[derive(Debug, Clone, Copy)]
struct ArmedDot {
    id: BodyId,
    ticks_left: u32,
}

/// Chain-reaction state over a field of free dots
#[derive(Debug)]
pub struct ChainMode {
    rng: Pcg32,
    armed: Vec<ArmedDot>,
    consumed: u32,
}

impl ChainMode {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            armed: Vec::new(),
            consumed: 0,
        }
    }

    /// Scatter `count` drifting dots across the field
    pub fn seed_field(&mut self, world: &mut World, count: u32) {
        let field = world.playfield();
        let radius = DOT_RADIUS;
        let max_x = (field.width - radius).max(radius + 1.0);
        let max_y = (field.height - radius).max(radius + 1.0);
        for _ in 0..count {
            let pos = Vec2::new(
                self.rng.random_range(radius..max_x),
                self.rng.random_range(radius..max_y),
            );
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(DRIFT_SPEED.0..DRIFT_SPEED.1);
            world.spawn_with_velocity(
                BodyKind::FreeDot,
                pos,
                radius,
                unit_from_angle(angle) * speed,
            );
        }
    }

    /// Arm a dot: grow it and start its expiry countdown
    ///
    /// Already-armed dots and anything that is not a free dot are left
    /// alone.
    pub fn ignite(&mut self, world: &mut World, id: BodyId) {
        if self.is_armed(id) {
            return;
        }
        let Some(body) = world.body(id) else {
            return;
        };
        if body.kind != BodyKind::FreeDot {
            return;
        }
        let target = body.base_radius * ARMED_GROWTH;
        world.set_radius_target(id, target);
        self.armed.push(ArmedDot {
            id,
            ticks_left: ARMED_LIFETIME_TICKS,
        });
        log::debug!("dot {id} armed");
    }

    /// Arm the unarmed dot nearest to `point`
    pub fn ignite_nearest(&mut self, world: &mut World, point: Vec2) -> Option<BodyId> {
        let nearest = world
            .bodies_of_kind(BodyKind::FreeDot)
            .filter(|b| !self.is_armed(b.id))
            .min_by(|a, b| {
                let da = (a.pos - point).length_squared();
                let db = (b.pos - point).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.id)?;
        self.ignite(world, nearest);
        Some(nearest)
    }

    /// Propagate the chain and retire expired dots
    ///
    /// Call once per executed fixed step with that step's report.
    pub fn update(&mut self, world: &mut World, report: &StepReport) {
        // Touching an armed dot arms the partner
        for pair in &report.contacts {
            if self.is_armed(pair.a) {
                self.ignite(world, pair.b);
            }
            if self.is_armed(pair.b) {
                self.ignite(world, pair.a);
            }
        }

        // Expiry countdown; a spent dot shrinks out
        for armed in &mut self.armed {
            if armed.ticks_left > 0 {
                armed.ticks_left -= 1;
                if armed.ticks_left == 0 {
                    world.set_radius_target(armed.id, 0.0);
                }
            }
        }

        // Shrunk-out dots leave the field for good
        for id in &report.defunct {
            if world.destroy(*id) {
                self.consumed += 1;
                log::debug!("dot {id} consumed, total {}", self.consumed);
            }
        }
        self.armed.retain(|a| world.contains(a.id));
    }

    fn is_armed(&self, id: BodyId) -> bool {
        self.armed.iter().any(|a| a.id == id)
    }

    /// Dots consumed by the chain so far
    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// The chain is over once nothing is armed any more
    pub fn settled(&self) -> bool {
        self.armed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::Playfield;
    use crate::tuning::Tuning;

    fn world() -> World {
        World::new(Playfield::new(800.0, 600.0), Tuning::default())
    }

    #[test]
    fn test_seed_field_is_deterministic() {
        let mut w1 = world();
        let mut w2 = world();
        ChainMode::new(7).seed_field(&mut w1, 20);
        ChainMode::new(7).seed_field(&mut w2, 20);

        assert_eq!(w1.len(), 20);
        for (a, b) in w1.bodies().iter().zip(w2.bodies()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(w1.velocity(a.id), w2.velocity(b.id));
        }
    }

    #[test]
    fn test_ignite_grows_and_arms() {
        let mut w = world();
        let mut mode = ChainMode::new(1);
        let id = w.spawn(BodyKind::FreeDot, Vec2::new(100.0, 100.0), 10.0);

        mode.ignite(&mut w, id);

        assert_eq!(mode.armed_count(), 1);
        let body = w.body(id).unwrap();
        assert_eq!(body.target_radius, 10.0 * ARMED_GROWTH);

        // Double ignition does not stack
        mode.ignite(&mut w, id);
        assert_eq!(mode.armed_count(), 1);
    }

    #[test]
    fn test_ignite_ignores_other_kinds() {
        let mut w = world();
        let mut mode = ChainMode::new(1);
        let bumper = w.spawn(BodyKind::Bumper, Vec2::new(100.0, 100.0), 20.0);

        mode.ignite(&mut w, bumper);
        assert_eq!(mode.armed_count(), 0);
    }

    #[test]
    fn test_contact_with_armed_dot_propagates() {
        let mut w = world();
        let mut mode = ChainMode::new(1);
        let first = w.spawn(BodyKind::FreeDot, Vec2::new(100.0, 100.0), 10.0);
        let second = w.spawn(BodyKind::FreeDot, Vec2::new(112.0, 100.0), 10.0);
        mode.ignite(&mut w, first);

        let report = w.step_frame(SIM_DT);
        mode.update(&mut w, &report);

        assert_eq!(mode.armed_count(), 2, "overlap must arm the second dot");
        assert_eq!(w.body(second).unwrap().target_radius, 10.0 * ARMED_GROWTH);
    }

    #[test]
    fn test_expired_dots_shrink_out_and_count() {
        let mut w = world();
        let mut mode = ChainMode::new(1);
        let id = w.spawn(BodyKind::FreeDot, Vec2::new(400.0, 300.0), 10.0);
        mode.ignite(&mut w, id);

        let mut steps = 0;
        while !w.is_empty() && steps < 1000 {
            let report = w.step_frame(SIM_DT);
            mode.update(&mut w, &report);
            steps += 1;
        }

        assert!(w.is_empty(), "armed dot must shrink out and be destroyed");
        assert_eq!(mode.consumed(), 1);
        assert!(mode.settled());
        assert!(steps < 400, "chain must settle in bounded time");
    }

    #[test]
    fn test_ignite_nearest_picks_the_closest_dot() {
        let mut w = world();
        let mut mode = ChainMode::new(1);
        let far = w.spawn(BodyKind::FreeDot, Vec2::new(700.0, 500.0), 10.0);
        let near = w.spawn(BodyKind::FreeDot, Vec2::new(110.0, 100.0), 10.0);

        let picked = mode.ignite_nearest(&mut w, Vec2::new(100.0, 100.0));

        assert_eq!(picked, Some(near));
        assert_ne!(picked, Some(far));
        assert_eq!(mode.armed_count(), 1);
    }
}
