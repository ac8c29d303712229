//! Pinball mode
//!
//! Seeded bumpers, a frictionless ball, and a steady pull toward the
//! bottom edge standing in for table tilt. Bumper hits score and kick
//! the ball back out; the bottom edge is the drain. Stock is limited.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::circles_overlap;
use crate::consts::SIM_DT;
use crate::sim::{BodyId, BodyKind, Modifier, StepReport, World};

/// Points per bumper hit
pub const BUMPER_SCORE: u64 = 100;
/// Fresh games start with this many balls
pub const BALL_STOCK: u32 = 3;
/// Outward speed added when a bumper fires
const KICK_SPEED: f32 = 160.0;
/// Downward pull in velocity per second
const FIELD_PULL: f32 = 140.0;
const BALL_RADIUS: f32 = 8.0;
const BUMPER_RADIUS: f32 = 22.0;
const PLACEMENT_ATTEMPTS: u32 = 20;

/// Pinball state: score, stock and the live ball
#[derive(Debug)]
pub struct PinballMode {
    pub(crate) ball: Option<BodyId>,
    pub(crate) bumpers: Vec<BodyId>,
    pub(crate) score: u64,
    pub(crate) balls_left: u32,
}

impl PinballMode {
    /// Seed a bumper field in the upper half of the table
    pub fn layout(world: &mut World, seed: u64, bumper_count: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let field = world.playfield();
        let mut bumpers = Vec::new();
        for _ in 0..bumper_count {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let pos = Vec2::new(
                    rng.random_range(field.width * 0.15..field.width * 0.85),
                    rng.random_range(field.height * 0.15..field.height * 0.6),
                );
                let clear = world
                    .bodies_of_kind(BodyKind::Bumper)
                    .all(|b| !circles_overlap(pos, BUMPER_RADIUS * 1.6, b.pos, b.radius));
                if clear {
                    bumpers.push(world.spawn(BodyKind::Bumper, pos, BUMPER_RADIUS));
                    break;
                }
            }
        }
        log::info!("table laid out with {} bumpers", bumpers.len());
        Self {
            ball: None,
            bumpers,
            score: 0,
            balls_left: BALL_STOCK,
        }
    }

    /// Put a ball in play; `false` when one is live or the stock is out
    pub fn launch(&mut self, world: &mut World) -> bool {
        if self.ball.is_some() || self.balls_left == 0 {
            return false;
        }
        let field = world.playfield();
        let id = world.spawn_with_velocity(
            BodyKind::Ball,
            Vec2::new(field.width * 0.08, field.height * 0.88),
            BALL_RADIUS,
            Vec2::new(240.0, -340.0),
        );
        world.set_modifier(id, Modifier::NoFriction, true);
        self.ball = Some(id);
        self.balls_left -= 1;
        log::info!("ball launched, {} in reserve", self.balls_left);
        true
    }

    /// Score bumper hits, apply the field pull, drain at the bottom
    ///
    /// Call once per executed fixed step with that step's report.
    pub fn update(&mut self, world: &mut World, report: &StepReport) {
        let Some(ball) = self.ball else {
            return;
        };
        // The ball can be destroyed out from under the mode, by a scene
        // edit for instance; a dead id must not hold the slot forever
        if !world.contains(ball) {
            self.ball = None;
            return;
        }

        world.apply_impulse(ball, Vec2::new(0.0, FIELD_PULL * SIM_DT));

        for other in report.touching(ball) {
            if world.kind_of(other) != Some(BodyKind::Bumper) {
                continue;
            }
            self.score += BUMPER_SCORE;
            let (Some(ball_pos), Some(bumper_pos)) =
                (world.position(ball), world.position(other))
            else {
                continue;
            };
            let away = (ball_pos - bumper_pos).normalize_or(Vec2::X);
            world.apply_impulse(ball, away * KICK_SPEED);
            log::debug!("bumper hit, score {}", self.score);
        }

        let field = world.playfield();
        if let Some(pos) = world.position(ball) {
            let radius = world.radius(ball).unwrap_or(BALL_RADIUS);
            if pos.y >= field.height - radius - 0.5 {
                world.destroy(ball);
                self.ball = None;
                log::info!("ball drained, score {}", self.score);
            }
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn balls_left(&self) -> u32 {
        self.balls_left
    }

    pub fn ball_in_play(&self) -> bool {
        self.ball.is_some()
    }

    pub fn bumper_count(&self) -> usize {
        self.bumpers.len()
    }

    pub fn game_over(&self) -> bool {
        self.ball.is_none() && self.balls_left == 0
    }
}
