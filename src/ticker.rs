//! Gravity timing
//!
//! [`compute_tick_interval`] is the engine-side rule: how long a level waits
//! between TICKs. [`Ticker`] is the caller-side timer that turns that rule,
//! scaled by difficulty, into TICK actions while a game is running.

use crate::game::Game;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Fastest allowed gravity
pub const MIN_TICK_MS: u64 = 80;
/// Gravity at level 0
pub const BASE_TICK_MS: u64 = 800;
/// Speed-up per level
pub const TICK_STEP_MS: u64 = 60;

/// Level-to-interval parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Interval at level 0 in milliseconds
    pub base_ms: u64,
    /// Milliseconds shaved off per level
    pub step_ms: u64,
    /// Lower bound in milliseconds
    pub min_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            base_ms: BASE_TICK_MS,
            step_ms: TICK_STEP_MS,
            min_ms: MIN_TICK_MS,
        }
    }
}

impl TickConfig {
    /// `max(min, base - level * step)` in milliseconds
    pub fn interval_ms(&self, level: u32) -> u64 {
        self.base_ms
            .saturating_sub(self.step_ms.saturating_mul(level as u64))
            .max(self.min_ms)
    }

    pub fn interval(&self, level: u32) -> Duration {
        Duration::from_millis(self.interval_ms(level))
    }
}

/// Gravity interval for `level` with the default parameters
pub fn compute_tick_interval(level: u32) -> Duration {
    TickConfig::default().interval(level)
}

/// Caller-chosen speed scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Interval multiplier as a fraction: easy is slower, hard is faster
    fn ratio(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (3, 2),
            Difficulty::Normal => (1, 1),
            Difficulty::Hard => (7, 10),
        }
    }

    pub fn scale(&self, interval: Duration) -> Duration {
        let (num, den) = self.ratio();
        interval * num / den
    }
}

/// Recurring TICK source owned by whoever drives a game
///
/// The ticker never reads a clock itself: callers pass `now` in, which keeps
/// it usable with a virtual clock.
#[derive(Debug, Clone)]
pub struct Ticker {
    config: TickConfig,
    difficulty: Difficulty,
    level: u32,
    interval: Duration,
    /// When the next TICK is due; None while stopped
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(config: TickConfig, difficulty: Difficulty) -> Self {
        Self {
            config,
            difficulty,
            level: 0,
            interval: Self::scaled(&config, difficulty, 0),
            next_due: None,
        }
    }

    fn scaled(config: &TickConfig, difficulty: Difficulty, level: u32) -> Duration {
        // a zero period would make poll() spin forever
        difficulty
            .scale(config.interval(level))
            .max(Duration::from_millis(1))
    }

    /// Current period between TICKs
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Start ticking; the first TICK is due one interval after `now`
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            debug!(interval_ms = self.interval.as_millis() as u64, "ticker started");
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            debug!("ticker stopped");
        }
    }

    /// Recompute the interval for a new level
    ///
    /// Returns true if the level changed.
    pub fn set_level(&mut self, level: u32) -> bool {
        if level == self.level {
            return false;
        }
        self.level = level;
        self.interval = Self::scaled(&self.config, self.difficulty, level);
        debug!(level, interval_ms = self.interval.as_millis() as u64, "tick interval changed");
        true
    }

    /// Number of TICKs due at `now`, catching up on any missed periods
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut fired = 0;
        while due <= now {
            fired += 1;
            due += self.interval;
        }
        self.next_due = Some(due);
        fired
    }

    /// Follow a game's pause/game-over flags and level
    ///
    /// A level change restarts the period from `now`.
    pub fn sync(&mut self, game: &Game, now: Instant) {
        let level_changed = self.set_level(game.score.level);
        let should_run = !game.is_paused() && !game.is_game_over();

        if !should_run {
            self.stop();
        } else if level_changed && self.is_running() {
            self.next_due = Some(now + self.interval);
        } else {
            self.start(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Action;

    #[test]
    fn test_reference_intervals() {
        assert_eq!(compute_tick_interval(0), Duration::from_millis(800));
        assert_eq!(compute_tick_interval(1), Duration::from_millis(740));
        assert_eq!(compute_tick_interval(12), Duration::from_millis(80));
        assert_eq!(compute_tick_interval(1000), Duration::from_millis(80));
    }

    #[test]
    fn test_interval_is_monotonic_and_floored() {
        let config = TickConfig::default();
        let mut previous = config.interval_ms(0);
        for level in 1..200 {
            let current = config.interval_ms(level);
            assert!(current <= previous);
            assert!(current >= MIN_TICK_MS);
            previous = current;
        }
        assert_eq!(config.interval_ms(u32::MAX), MIN_TICK_MS);
    }

    #[test]
    fn test_difficulty_scaling() {
        let base = Duration::from_millis(800);
        assert_eq!(Difficulty::Easy.scale(base), Duration::from_millis(1200));
        assert_eq!(Difficulty::Normal.scale(base), base);
        assert_eq!(Difficulty::Hard.scale(base), Duration::from_millis(560));
    }

    #[test]
    fn test_poll_counts_elapsed_periods() {
        let mut ticker = Ticker::new(TickConfig::default(), Difficulty::Normal);
        let start = Instant::now();
        assert_eq!(ticker.poll(start + Duration::from_secs(5)), 0, "stopped ticker fires");

        ticker.start(start);
        assert_eq!(ticker.poll(start + Duration::from_millis(799)), 0);
        assert_eq!(ticker.poll(start + Duration::from_millis(800)), 1);
        assert_eq!(ticker.poll(start + Duration::from_millis(3200)), 3);
        assert_eq!(ticker.poll(start + Duration::from_millis(3200)), 0);
    }

    #[test]
    fn test_stop_and_restart() {
        let mut ticker = Ticker::new(TickConfig::default(), Difficulty::Hard);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.poll(start + Duration::from_secs(10)), 0);

        let later = start + Duration::from_secs(10);
        ticker.start(later);
        assert_eq!(ticker.poll(later + Duration::from_millis(560)), 1);
    }

    #[test]
    fn test_sync_follows_pause() {
        let mut ticker = Ticker::new(TickConfig::default(), Difficulty::Normal);
        let now = Instant::now();
        let game = Game::with_seed(9);

        ticker.sync(&game, now);
        assert!(ticker.is_running());

        let paused = game.apply(Action::PauseToggle);
        ticker.sync(&paused, now);
        assert!(!ticker.is_running());

        let resumed = paused.apply(Action::PauseToggle);
        ticker.sync(&resumed, now);
        assert!(ticker.is_running());
    }

    #[test]
    fn test_sync_picks_up_level() {
        let mut ticker = Ticker::new(TickConfig::default(), Difficulty::Normal);
        let now = Instant::now();
        let mut game = Game::with_seed(9);
        ticker.sync(&game, now);

        game.score.lines = 20;
        game.score.level = 2;
        let later = now + Duration::from_millis(500);
        ticker.sync(&game, later);
        assert_eq!(ticker.level(), 2);
        assert_eq!(ticker.interval(), Duration::from_millis(680));
        // period restarted from `later`
        assert_eq!(ticker.poll(later + Duration::from_millis(679)), 0);
        assert_eq!(ticker.poll(later + Duration::from_millis(680)), 1);
    }
}
