//! Golf mode
//!
//! One ball, one hole, a scattering of bumper obstacles. The hole is a
//! sensor: the solver reports the overlap but never deflects the ball,
//! so capture is purely a speed check here. Strokes are impulses.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::circles_overlap;
use crate::sim::{BodyId, BodyKind, StepReport, World};

/// Ball must be at or below this speed to drop in
pub const CAPTURE_SPEED: f32 = 45.0;
const BALL_RADIUS: f32 = 8.0;
const HOLE_RADIUS: f32 = 12.0;
const BUMPER_RADIUS: f32 = 18.0;
/// Placement attempts per obstacle before giving up on it
const PLACEMENT_ATTEMPTS: u32 = 20;

/// Golf state: tee to hole, counting strokes
#[derive(Debug)]
pub struct GolfMode {
    pub(crate) ball: BodyId,
    pub(crate) hole: BodyId,
    pub(crate) strokes: u32,
    pub(crate) holed: bool,
}

impl GolfMode {
    /// Lay out a course: tee on the left, hole in the right third,
    /// obstacles scattered between
    pub fn layout(world: &mut World, seed: u64, bumpers: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = world.playfield();

        let tee = Vec2::new(field.width * 0.12, field.height * 0.5);
        let ball = world.spawn(BodyKind::Ball, tee, BALL_RADIUS);

        let hole_pos = Vec2::new(
            rng.random_range(field.width * 0.7..field.width * 0.9),
            rng.random_range(field.height * 0.2..field.height * 0.8),
        );
        let hole = world.spawn(BodyKind::Target, hole_pos, HOLE_RADIUS);

        for _ in 0..bumpers {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let pos = Vec2::new(
                    rng.random_range(field.width * 0.25..field.width * 0.85),
                    rng.random_range(field.height * 0.15..field.height * 0.85),
                );
                // Keep a clear tee shot and an open mouth on the hole
                let clear = !circles_overlap(pos, BUMPER_RADIUS * 2.0, tee, BALL_RADIUS)
                    && !circles_overlap(pos, BUMPER_RADIUS * 2.0, hole_pos, HOLE_RADIUS)
                    && world
                        .bodies_of_kind(BodyKind::Bumper)
                        .all(|b| !circles_overlap(pos, BUMPER_RADIUS + 4.0, b.pos, b.radius));
                if clear {
                    world.spawn(BodyKind::Bumper, pos, BUMPER_RADIUS);
                    break;
                }
            }
        }

        log::info!(
            "course laid out, hole at ({:.0}, {:.0})",
            hole_pos.x,
            hole_pos.y
        );
        Self {
            ball,
            hole,
            strokes: 0,
            holed: false,
        }
    }

    /// Hit the ball; every call counts one stroke
    pub fn stroke(&mut self, world: &mut World, aim: Vec2) {
        if self.holed || !world.contains(self.ball) {
            return;
        }
        world.apply_impulse(self.ball, aim);
        self.strokes += 1;
        log::debug!("stroke {}", self.strokes);
    }

    /// Check for capture; call once per executed fixed step
    pub fn update(&mut self, world: &mut World, report: &StepReport) {
        if self.holed {
            return;
        }
        let over_hole = report.touching(self.ball).any(|other| other == self.hole);
        if over_hole && world.velocity(self.ball).length() <= CAPTURE_SPEED {
            self.holed = true;
            world.destroy(self.ball);
            log::info!("holed out in {} strokes", self.strokes);
        }
    }

    pub fn is_holed(&self) -> bool {
        self.holed
    }

    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    pub fn ball(&self) -> BodyId {
        self.ball
    }

    pub fn hole(&self) -> BodyId {
        self.hole
    }

    /// True once the ball has effectively stopped rolling
    pub fn ball_at_rest(&self, world: &World) -> bool {
        world.velocity(self.ball).length() < 2.0
    }
}
