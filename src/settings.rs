//! Game settings and preferences
//!
//! Owned by the game loop and handed to screens each frame, so a change made
//! on one screen (difficulty, sound toggles) is seen by all of them.
//! Persisted as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DESIGN_HEIGHT, DESIGN_WIDTH, FPS, GRID_COLS, GRID_ROWS};

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "0" => Some(Difficulty::Easy),
            "medium" | "med" | "1" => Some(Difficulty::Medium),
            "hard" | "2" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Table index (0, 1, 2)
    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Settings load/save failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Frames per second (one game tick per frame)
    pub fps: u32,

    // === Board ===
    pub cols: usize,
    pub rows: usize,

    // === Gameplay ===
    pub difficulty: Difficulty,
    /// Sequence length for each difficulty
    pub tiles_per_level: [usize; 3],
    /// Seconds for each half (rise, fall) of a tile pulse, per difficulty
    pub pulse_duration_per_level: [f32; 3],
    /// Correct rounds needed to open the chamber
    pub wins_to_open_chamber: u32,
    /// Seconds for the winning board zoom-out
    pub zoom_out_duration: f32,

    // === Audio ===
    pub sound_fx_on: bool,
    pub music_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DESIGN_WIDTH,
            screen_height: DESIGN_HEIGHT,
            fps: FPS,

            cols: GRID_COLS,
            rows: GRID_ROWS,

            difficulty: Difficulty::Easy,
            tiles_per_level: [4, 5, 6],
            pulse_duration_per_level: [0.4, 0.3, 0.2],
            wins_to_open_chamber: 1,
            zoom_out_duration: 5.0,

            sound_fx_on: true,
            music_on: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }
}

impl Settings {
    /// Horizontal scale relative to the 800x480 design size
    pub fn scale_x(&self) -> f32 {
        self.screen_width / DESIGN_WIDTH
    }

    /// Vertical scale relative to the 800x480 design size
    pub fn scale_y(&self) -> f32 {
        self.screen_height / DESIGN_HEIGHT
    }

    /// Number of tiles on the board
    pub fn num_tiles(&self) -> usize {
        self.cols * self.rows
    }

    /// Sequence length for the current difficulty
    pub fn tiles_per_sequence(&self) -> usize {
        self.tiles_per_level[self.difficulty.index()]
    }

    /// Pulse half-duration for the current difficulty
    pub fn pulse_duration(&self) -> f32 {
        self.pulse_duration_per_level[self.difficulty.index()]
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty != difficulty {
            log::info!(
                "Difficulty {} -> {}",
                self.difficulty.as_str(),
                difficulty.as_str()
            );
        }
        self.difficulty = difficulty;
    }

    pub fn set_sound_fx(&mut self, on: bool) {
        self.sound_fx_on = on;
    }

    pub fn set_music(&mut self, on: bool) {
        self.music_on = on;
    }

    /// Check that the settings describe a playable game
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(SettingsError::Invalid(format!(
                "board must have at least one tile, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        let num_tiles = self.num_tiles();
        for (level, &len) in self.tiles_per_level.iter().enumerate() {
            if len == 0 || len > num_tiles {
                return Err(SettingsError::Invalid(format!(
                    "sequence length {} for level {} must be within 1..={}",
                    len, level, num_tiles
                )));
            }
        }
        if self.pulse_duration_per_level.iter().any(|&d| d <= 0.0) {
            return Err(SettingsError::Invalid(
                "pulse durations must be positive".into(),
            ));
        }
        if self.zoom_out_duration <= 0.0 {
            return Err(SettingsError::Invalid(
                "zoom-out duration must be positive".into(),
            ));
        }
        if self.wins_to_open_chamber == 0 {
            return Err(SettingsError::Invalid(
                "wins to open the chamber must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}): {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.num_tiles(), 9);
        assert_eq!(settings.tiles_per_sequence(), 4);
        assert!((settings.pulse_duration() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_difficulty_tables() {
        let mut settings = Settings::default();
        settings.set_difficulty(Difficulty::Hard);
        assert_eq!(settings.tiles_per_sequence(), 6);
        assert!((settings.pulse_duration() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from_str("MED"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("2"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::from_index(1), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_index(3), None);
    }

    #[test]
    fn test_scale_factors() {
        let settings = Settings {
            screen_width: 1600.0,
            screen_height: 960.0,
            ..Default::default()
        };
        assert_eq!(settings.scale_x(), 2.0);
        assert_eq!(settings.scale_y(), 2.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "difficulty": "Medium", "sound_fx_on": false }"#)
            .unwrap();
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(!settings.sound_fx_on);
        assert_eq!(settings.fps, 60);
    }

    #[test]
    fn test_sequence_longer_than_board_is_rejected() {
        let err = Settings::from_json(r#"{ "tiles_per_level": [4, 5, 10] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_garbage_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("tomb_tiles_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.set_difficulty(Difficulty::Hard);
        settings.set_music(false);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert!(!loaded.music_on);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/definitely/not/here.json");
        assert_eq!(settings.difficulty, Difficulty::Easy);
    }
}
