//! Cluster-break mode
//!
//! A hex-packed clump of cells with a little random jiggle, and one
//! heavy striker to throw at it. Cells the striker touches pop; the
//! round is over when the clump is gone.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use crate::sim::{BodyId, BodyKind, StepReport, World};
use crate::unit_from_angle;

const CELL_RADIUS: f32 = 9.0;
const STRIKER_RADIUS: f32 = 14.0;
/// Upper bound on the idle drift given to each cell
const JIGGLE_SPEED: f32 = 10.0;
/// Centre distance between ring neighbours, with a hair of slack
const CELL_SPACING: f32 = CELL_RADIUS * 2.0 + 1.0;

/// Cluster state: the striker and the pop tally
#[derive(Debug)]
pub struct ClusterMode {
    pub(crate) striker: BodyId,
    pub(crate) destroyed: u32,
}

impl ClusterMode {
    /// Build the clump and the striker
    ///
    /// Ring `k` carries `6k` cells at radius `k * CELL_SPACING`, so
    /// `rings = 2` gives the 19-cell hex patch. `rings = 0` is a lone
    /// centre cell.
    pub fn seed(
        world: &mut World,
        seed: u64,
        center: Vec2,
        striker_pos: Vec2,
        rings: u32,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut jiggle = |world: &mut World, pos: Vec2| {
            let vel = unit_from_angle(rng.random_range(0.0..TAU))
                * rng.random_range(0.0..JIGGLE_SPEED);
            world.spawn_with_velocity(BodyKind::ClusterCell, pos, CELL_RADIUS, vel);
        };

        jiggle(world, center);
        for ring in 1..=rings {
            let count = 6 * ring;
            for step in 0..count {
                let angle = TAU * step as f32 / count as f32;
                let pos = center + unit_from_angle(angle) * (ring as f32 * CELL_SPACING);
                jiggle(world, pos);
            }
        }

        let striker = world.spawn(BodyKind::Ball, striker_pos, STRIKER_RADIUS);
        log::info!("cluster seeded, {} cells", world.bodies_of_kind(BodyKind::ClusterCell).count());
        Self {
            striker,
            destroyed: 0,
        }
    }

    /// Hurl the striker at the clump
    pub fn throw(&self, world: &mut World, vel: Vec2) {
        world.apply_impulse(self.striker, vel);
    }

    /// Pop every cell the striker touched this step
    pub fn update(&mut self, world: &mut World, report: &StepReport) {
        for other in report.touching(self.striker) {
            if world.kind_of(other) == Some(BodyKind::ClusterCell) && world.destroy(other) {
                self.destroyed += 1;
                log::debug!("cell popped, {} down", self.destroyed);
            }
        }
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }

    pub fn cells_left(&self, world: &World) -> usize {
        world.bodies_of_kind(BodyKind::ClusterCell).count()
    }

    pub fn cleared(&self, world: &World) -> bool {
        self.cells_left(world) == 0
    }

    pub fn striker(&self) -> BodyId {
        self.striker
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
    fn test_seed_counts_cells_per_ring() {
        let mut w = world();
        let mode = ClusterMode::seed(
            &mut w,
            11,
            Vec2::new(400.0, 300.0),
            Vec2::new(100.0, 300.0),
            2,
        );

        // 1 centre + 6 + 12
        assert_eq!(mode.cells_left(&w), 19);
        assert_eq!(w.kind_of(mode.striker()), Some(BodyKind::Ball));
        assert!(!mode.cleared(&w));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let mut w1 = world();
        let mut w2 = world();
        ClusterMode::seed(&mut w1, 7, Vec2::new(400.0, 300.0), Vec2::new(100.0, 300.0), 2);
        ClusterMode::seed(&mut w2, 7, Vec2::new(400.0, 300.0), Vec2::new(100.0, 300.0), 2);

        assert_eq!(w1.len(), w2.len());
        for (a, b) in w1.bodies().iter().zip(w2.bodies()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(w1.velocity(a.id), w2.velocity(b.id));
        }
    }

    #[test]
    fn test_throw_moves_the_striker() {
        let mut w = world();
        let mode = ClusterMode::seed(
            &mut w,
            3,
            Vec2::new(400.0, 300.0),
            Vec2::new(100.0, 300.0),
            1,
        );

        mode.throw(&mut w, Vec2::new(200.0, 0.0));
        assert_eq!(w.velocity(mode.striker()), Vec2::new(200.0, 0.0));
    }

    #[test]
    fn test_striker_pops_cells_and_survives() {
        let mut w = world();
        let mut mode = ClusterMode::seed(
            &mut w,
            9,
            Vec2::new(400.0, 300.0),
            Vec2::new(360.0, 300.0),
            0,
        );
        mode.throw(&mut w, Vec2::new(300.0, 0.0));

        for _ in 0..60 {
            let report = w.step_frame(SIM_DT);
            mode.update(&mut w, &report);
            if mode.destroyed() > 0 {
                break;
            }
        }

        assert_eq!(mode.destroyed(), 1);
        assert!(mode.cleared(&w));
        assert!(w.contains(mode.striker()));
    }

    #[test]
    fn test_update_only_pops_cells() {
        let mut w = world();
        let dot = w.spawn(BodyKind::FreeDot, Vec2::new(124.0, 100.0), 10.0);
        let striker = w.spawn(BodyKind::Ball, Vec2::new(100.0, 100.0), STRIKER_RADIUS);
        let mut mode = ClusterMode {
            striker,
            destroyed: 0,
        };

        mode.throw(&mut w, Vec2::new(120.0, 0.0));
        let report = w.step_frame(SIM_DT);
        mode.update(&mut w, &report);

        assert!(report.touching(striker).any(|id| id == dot));
        assert_eq!(mode.destroyed(), 0);
        assert!(w.contains(dot));
    }
}
