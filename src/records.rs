//! Finished-game records
//!
//! The engine only exposes score/lines/level; whoever drives a game hands a
//! [`GameRecord`] to a [`RecordStore`] when it ends. [`HighScores`] is the
//! local store kept inside the settings file.

use crate::game::Game;
use crate::ticker::Difficulty;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// How many records the local table keeps
pub const MAX_RECORDS: usize = 5;

/// A single finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub difficulty: Difficulty,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

impl GameRecord {
    /// Snapshot the final numbers of `game`
    pub fn from_game(game: &Game, difficulty: Difficulty) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self {
            score: game.score.points,
            lines: game.score.lines,
            level: game.score.level,
            difficulty,
            timestamp,
        }
    }
}

/// Anything that accepts finished games
pub trait RecordStore {
    fn save_record(&mut self, record: GameRecord) -> anyhow::Result<()>;

    /// Best records first, at most `limit`
    fn top_scores(&self, limit: usize) -> Vec<GameRecord>;
}

impl<T: RecordStore + ?Sized> RecordStore for &mut T {
    fn save_record(&mut self, record: GameRecord) -> anyhow::Result<()> {
        (**self).save_record(record)
    }

    fn top_scores(&self, limit: usize) -> Vec<GameRecord> {
        (**self).top_scores(limit)
    }
}

/// Local high score table, best score first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub entries: Vec<GameRecord>,
}

impl HighScores {
    /// Insert a record, keeping the table sorted and capped
    pub fn add(&mut self, record: GameRecord) {
        self.entries.push(record);
        // stable sort: equal scores keep arrival order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_RECORDS);
    }

    /// Get the best score
    pub fn best(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Forget every record
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl RecordStore for HighScores {
    fn save_record(&mut self, record: GameRecord) -> anyhow::Result<()> {
        self.add(record);
        Ok(())
    }

    fn top_scores(&self, limit: usize) -> Vec<GameRecord> {
        self.entries.iter().take(limit).cloned().collect()
    }
}
