//! Arcade settings
//!
//! Loaded from an optional JSON file. Every field has a default, so a file
//! only needs to name what it overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "termcade.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisSettings {
    /// Gravity step interval in milliseconds
    pub gravity_ms: u64,
}

impl Default for TetrisSettings {
    fn default() -> Self {
        Self {
            gravity_ms: TETRIS_GRAVITY_MS,
        }
    }
}

impl TetrisSettings {
    pub fn gravity(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeSettings {
    /// Starting interval between moves
    pub interval_ms: u64,
    /// Fastest the snake can get
    pub min_interval_ms: u64,
    /// How much each speed-up shaves off the interval
    pub speedup_step_ms: u64,
    /// Speed up whenever the score reaches a multiple of this
    pub speedup_every: u32,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            interval_ms: SNAKE_INTERVAL_MS,
            min_interval_ms: SNAKE_MIN_INTERVAL_MS,
            speedup_step_ms: SNAKE_SPEEDUP_STEP_MS,
            speedup_every: SNAKE_SPEEDUP_EVERY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JeweledSettings {
    /// Upper bound on cascade iterations for a single swap
    pub cascade_cap: u32,
}

impl Default for JeweledSettings {
    fn default() -> Self {
        Self {
            cascade_cap: JEWELED_CASCADE_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongSettings {
    pub frame_ms: u64,
    /// First side to reach this score ends the match
    pub winning_score: u32,
}

impl Default for PongSettings {
    fn default() -> Self {
        Self {
            frame_ms: PONG_FRAME_MS,
            winning_score: PONG_WINNING_SCORE,
        }
    }
}

/// Arcade settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for every session; a clock seed is used when absent
    pub seed: Option<u64>,
    /// Where `RUST_LOG` output goes (the terminal is busy drawing)
    pub log_file: PathBuf,
    pub tetris: TetrisSettings,
    pub snake: SnakeSettings,
    pub jeweled: JeweledSettings,
    pub pong: PongSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            log_file: PathBuf::from("termcade.log"),
            tetris: TetrisSettings::default(),
            snake: SnakeSettings::default(),
            jeweled: JeweledSettings::default(),
            pong: PongSettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Load an explicitly requested file, or the default file if it exists.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_SETTINGS_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 9, "snake": { "interval_ms": 200 } }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.snake.interval_ms, 200);
        assert_eq!(settings.snake.min_interval_ms, SNAKE_MIN_INTERVAL_MS);
        assert_eq!(settings.tetris, TetrisSettings::default());
        assert_eq!(settings.jeweled.cascade_cap, JEWELED_CASCADE_CAP);
    }

    #[test]
    fn empty_object_is_default() {
        let settings = Settings::from_json("{}").expect("valid settings");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!(
            "termcade_bad_settings_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").expect("write temp file");
        let err = Settings::load(&path).expect_err("malformed json");
        let _ = fs::remove_file(&path);
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = Path::new("/definitely/not/here/termcade.json");
        assert!(Settings::resolve(Some(path)).is_err());
    }
}
