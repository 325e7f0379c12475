//! TETRS simulator
//!
//! Plays one headless game with a random bot on a virtual clock, the same way
//! a front end would drive the engine: inputs and TICKs through a session.

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tetrs_engine::{Action, MoveDirection, RotationDirection, Session, Settings};
use tracing_subscriber::EnvFilter;

/// Time between bot inputs
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Stop a game that refuses to end
const MAX_PIECES: u32 = 2_000;

/// Get the tetrs temp directory, creating it if needed
fn tetrs_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Inputs for one piece: turn, slide, nudge down, drop
fn plan_piece(rng: &mut ChaCha8Rng) -> VecDeque<Action> {
    let mut plan = VecDeque::new();

    let direction = if rng.gen_bool(0.5) {
        RotationDirection::Clockwise
    } else {
        RotationDirection::CounterClockwise
    };
    for _ in 0..rng.gen_range(0..4) {
        plan.push_back(Action::Rotate(direction));
    }

    let shift: i32 = rng.gen_range(-5..=5);
    let step = if shift < 0 {
        MoveDirection::Left
    } else {
        MoveDirection::Right
    };
    for _ in 0..shift.unsigned_abs() {
        plan.push_back(Action::Move(step));
    }

    for _ in 0..rng.gen_range(0..3) {
        plan.push_back(Action::Move(MoveDirection::Down));
    }
    plan.push_back(Action::HardDrop);
    plan
}

fn main() -> Result<()> {
    // Generate session ID for this run
    let session_id: u32 = rand::random();

    // Setup tracing to log file
    let tetrs_dir = tetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&tetrs_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tetrs_engine=debug,tetrs_sim=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "TETRS simulator starting up, session={:08x}, log={}",
        session_id,
        tetrs_dir.join(&log_file).display()
    );

    // Load settings
    let mut settings = Settings::load();
    let difficulty = settings.gameplay.difficulty;
    let mut bot = match settings.gameplay.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::seed_from_u64(rand::random()),
    };

    let high_scores = std::mem::take(&mut settings.high_scores);
    let mut session = Session::from_settings(&settings, high_scores);

    let mut clock = Instant::now();
    let mut plan = VecDeque::new();
    let mut pieces = 0;
    session.advance(clock);

    while !session.game().is_game_over() && pieces < MAX_PIECES {
        if plan.is_empty() {
            plan = plan_piece(&mut bot);
        }
        if let Some(action) = plan.pop_front() {
            if action == Action::HardDrop {
                pieces += 1;
            }
            session.push(action);
        }
        clock += FRAME_DURATION;
        session.advance(clock);
    }

    let game = session.game().clone();
    settings.high_scores = session.into_store();

    if !game.is_game_over() {
        tracing::warn!("Stopped after {} pieces without topping out", pieces);
    }

    // Save settings (including any new high score)
    if let Err(e) = settings.save() {
        eprintln!("Warning: Could not save settings: {:#}", e);
    }

    println!("\nTETRS simulation finished after {} pieces", pieces);
    println!("Difficulty: {}", difficulty.name());
    println!("Final Score: {}", game.points());
    println!("Level: {} | Lines: {}", game.level(), game.lines());
    if let Some(best) = settings.high_scores.best() {
        println!("Best Score: {}", best);
    }

    Ok(())
}
