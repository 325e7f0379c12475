//! Scoring and leveling
//!
//! Classic table: 100/300/500/800 for 1-4 lines, times (level + 1), where the
//! level is the one reached *after* the clear. A level lasts 10 lines.

use serde::{Deserialize, Serialize};

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base reward for clearing `lines` rows in one lock
///
/// Anything outside 1..=4 scores nothing.
pub fn line_clear_reward(lines: u32) -> u64 {
    match lines {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

/// Level reached after `lines` total cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Score tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Current level
    pub level: u32,
    /// Total lines cleared
    pub lines: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lock that cleared `lines` rows; returns the points awarded
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        self.lines += lines;
        self.level = level_for_lines(self.lines);

        let awarded = line_clear_reward(lines) * (self.level as u64 + 1);
        self.points += awarded;
        awarded
    }
}
