//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs/settings.toml (or platform equivalent).
//! Nothing here changes how the engine plays; it only steers the caller's
//! ticker, renderer and record keeping.

use crate::generator::Randomizer;
use crate::records::HighScores;
use crate::ticker::{Difficulty, TickConfig};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Game settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay settings
    pub gameplay: GameplaySettings,
    /// Gravity timing
    pub speed: TickConfig,
    /// Visual settings
    pub visual: VisualSettings,
    /// Control settings
    pub controls: ControlSettings,
    /// Audio settings
    pub audio: AudioSettings,
    /// High scores
    pub high_scores: HighScores,
}

/// Gameplay settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Gravity multiplier applied on top of the level interval
    pub difficulty: Difficulty,
    /// Piece randomizer
    pub randomizer: Randomizer,
    /// Fixed seed for reproducible piece sequences
    pub seed: Option<u64>,
}

/// Visual settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Draw grid lines between cells
    pub show_grid: bool,
    /// Ghost piece visibility
    pub show_ghost: bool,
}

/// How the player drives the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    #[default]
    Buttons,
    Swipes,
}

/// Control settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub mode: ControlMode,
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_ghost: true,
        }
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetrs", "tetrs").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the platform config file, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`; a missing or unreadable file gives defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::load_from(path).unwrap_or_else(|e| {
            warn!("Using default settings: {:#}", e);
            Self::default()
        })
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save settings to the platform config file
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("Could not determine settings path")?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config dir {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        Ok(())
    }
}
