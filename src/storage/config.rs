//! Application configuration.
//!
//! Loaded from TOML once at startup and handed to the race core as plain
//! values. Nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::racing::{RaceConfig, Rgb};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frame source settings
    pub input: InputSettings,
    /// Detector model settings
    pub model: ModelSettings,
    /// Camera capture settings
    pub camera: CameraSettings,
    /// Display/processing resolution
    pub display: DisplaySettings,
    /// Race timing parameters
    pub race: RaceConfig,
    /// Result export settings
    pub export: ExportSettings,
    /// Registered entrants
    pub entrants: Vec<EntrantConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputSettings::default(),
            model: ModelSettings::default(),
            camera: CameraSettings::default(),
            display: DisplaySettings::default(),
            race: RaceConfig::default(),
            export: ExportSettings::default(),
            entrants: vec![
                EntrantConfig::new("blue-car", "Blue Car", Rgb(0, 0, 255)),
                EntrantConfig::new("green-car", "Green Car", Rgb(0, 255, 0)),
            ],
        }
    }
}

impl AppConfig {
    /// Check value ranges that would make the race core misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let race = &self.race;
        if race.history_capacity < 2 {
            return Err(ConfigError::Invalid(
                "race.history_capacity must be at least 2".to_string(),
            ));
        }
        if race.required_history() > race.history_capacity {
            return Err(ConfigError::Invalid(
                "race.min_history_length exceeds race.history_capacity".to_string(),
            ));
        }
        if race.lap_cooldown_seconds < 0.0 || race.penalty_flash_duration < 0.0 {
            return Err(ConfigError::Invalid(
                "race durations must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.model.confidence_threshold) {
            return Err(ConfigError::Invalid(
                "model.confidence_threshold must be between 0 and 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entrant in &self.entrants {
            if !seen.insert(entrant.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate entrant id: {}",
                    entrant.id
                )));
            }
        }

        Ok(())
    }
}

/// Frame source settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Video file to process instead of the camera
    pub video_path: Option<PathBuf>,
    /// Camera index used when no video file is given
    pub camera_index: u32,
    /// Recorded detection session (JSON lines)
    pub replay_path: Option<PathBuf>,
}

/// Detector model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Path to the detector weights
    pub path: PathBuf,
    /// Minimum confidence (0-1) for a detection to count
    pub confidence_threshold: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./models/best.pt"),
            confidence_threshold: 0.5,
        }
    }
}

/// Camera capture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
        }
    }
}

/// Resolution frames are resized to before detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Result export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory lap CSV files are written to
    pub directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// A racer known to the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrantConfig {
    /// Detector class name
    pub id: String,
    /// Display name
    pub name: String,
    /// Display color
    pub color: Rgb,
}

impl EntrantConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "laptrack", "LapTrack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from a file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to a file.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
