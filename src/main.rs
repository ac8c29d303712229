//! Dotfield entry point
//!
//! Headless demo driver: picks a game mode from the first argument
//! (chain, golf, pinball or cluster), runs it for a stretch of
//! simulated time at the fixed step, and logs what happened. The
//! `DOTFIELD_SEED` environment variable overrides the scenario seed.

use glam::Vec2;

use dotfield::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use dotfield::modes::{ChainMode, ClusterMode, GolfMode, PinballMode};
use dotfield::sim::{FrameClock, Playfield, World};
use dotfield::{SceneSnapshot, Tuning};

/// Frames of simulated wall time per demo run, fed at 60 Hz
const DEMO_FRAMES: u32 = 2400;
const FRAME_ELAPSED: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "chain".to_string());
    let seed = std::env::var("DOTFIELD_SEED")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(42);

    log::info!("dotfield starting, mode {} with seed {}", mode, seed);

    let mut world = World::new(Playfield::new(FIELD_WIDTH, FIELD_HEIGHT), Tuning::default());
    match mode.as_str() {
        "chain" => run_chain(&mut world, seed),
        "golf" => run_golf(&mut world, seed),
        "pinball" => run_pinball(&mut world, seed),
        "cluster" => run_cluster(&mut world, seed),
        other => {
            log::error!("unknown mode {}; expected chain, golf, pinball or cluster", other);
            return;
        }
    }

    snapshot_round_trip(&world);
}

/// Scatter dots, ignite the one nearest centre, run the reaction out
fn run_chain(world: &mut World, seed: u64) {
    let mut mode = ChainMode::new(seed);
    mode.seed_field(world, 40);
    if mode.ignite_nearest(world, world.playfield().center()).is_none() {
        log::warn!("nothing to ignite");
        return;
    }

    let mut clock = FrameClock::default();
    for _ in 0..DEMO_FRAMES {
        for report in clock.advance(world, FRAME_ELAPSED) {
            mode.update(world, &report);
        }
        if mode.settled() {
            break;
        }
    }
    log::info!(
        "chain settled: {} dots consumed, {} bodies left",
        mode.consumed(),
        world.len()
    );
}

/// Putt toward the hole whenever the ball comes to rest
fn run_golf(world: &mut World, seed: u64) {
    let mut mode = GolfMode::layout(world, seed, 5);
    let mut clock = FrameClock::default();

    for _ in 0..DEMO_FRAMES {
        if mode.is_holed() {
            break;
        }
        if mode.ball_at_rest(world) {
            if let (Some(ball), Some(hole)) =
                (world.position(mode.ball()), world.position(mode.hole()))
            {
                // Flat friction makes stopping distance proportional to
                // launch speed, so this lands the ball at the cup
                let aim = hole - ball;
                let speed = (aim.length() * 1.2).clamp(60.0, 320.0);
                mode.stroke(world, aim.normalize_or(Vec2::X) * speed);
            }
        }
        for report in clock.advance(world, FRAME_ELAPSED) {
            mode.update(world, &report);
        }
    }
    log::info!("golf finished: holed {} in {} strokes", mode.is_holed(), mode.strokes());
}

/// Keep relaunching until the stock runs out
fn run_pinball(world: &mut World, seed: u64) {
    let mut mode = PinballMode::layout(world, seed, 6);
    let mut clock = FrameClock::default();

    for _ in 0..DEMO_FRAMES {
        if mode.game_over() {
            break;
        }
        if !mode.ball_in_play() {
            mode.launch(world);
        }
        for report in clock.advance(world, FRAME_ELAPSED) {
            mode.update(world, &report);
        }
    }
    log::info!(
        "pinball over: score {} off {} bumpers, {} balls left",
        mode.score(),
        mode.bumper_count(),
        mode.balls_left()
    );
}

/// One hard throw at the clump, then watch it scatter
fn run_cluster(world: &mut World, seed: u64) {
    let mut mode = ClusterMode::seed(
        world,
        seed,
        Vec2::new(FIELD_WIDTH * 0.6, FIELD_HEIGHT * 0.5),
        Vec2::new(FIELD_WIDTH * 0.15, FIELD_HEIGHT * 0.5),
        2,
    );
    mode.throw(world, Vec2::new(420.0, 0.0));

    let mut clock = FrameClock::default();
    for _ in 0..DEMO_FRAMES {
        for report in clock.advance(world, FRAME_ELAPSED) {
            mode.update(world, &report);
        }
        if mode.cleared(world) {
            break;
        }
    }
    log::info!(
        "cluster run: {} cells popped, {} left",
        mode.destroyed(),
        mode.cells_left(world)
    );
}

/// Capture, serialize and restore the final world as a consistency check
fn snapshot_round_trip(world: &World) {
    let snapshot = SceneSnapshot::capture(world);
    let json = match snapshot.to_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("snapshot encode failed: {}", err);
            return;
        }
    };
    log::info!("snapshot holds {} bodies in {} bytes", snapshot.bodies.len(), json.len());

    match SceneSnapshot::from_json(&json) {
        Ok(parsed) => {
            let restored = parsed.restore();
            log::info!("restore check: {} bodies back", restored.len());
        }
        Err(err) => log::error!("snapshot parse failed: {}", err),
    }
}
