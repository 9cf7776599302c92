// Configuration for pacer playback, export and input handling.
// Defaults match the mode presets of the reading controls.

use crate::reading::SegmentMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const WORD_BASE_DELAY_MS: u64 = 400;
pub const WORD_PER_WORD_DELAY_MS: u64 = 0;
pub const SENTENCE_BASE_DELAY_MS: u64 = 1350;
pub const SENTENCE_PER_WORD_DELAY_MS: u64 = 400;
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "yellow";

const CONFIG_DIRNAME: &str = "pacer";
const CONFIG_FILENAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Settings the playback engine reads when it starts or resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Word or sentence units
    pub mode: SegmentMode,

    /// Base delay between units in milliseconds (positive)
    pub base_delay_ms: u64,

    /// Extra time per word of a sentence unit (sentence mode only)
    pub per_word_delay_ms: u64,

    /// Highlight color, a color name or `#rrggbb`
    pub highlight_color: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::for_mode(SegmentMode::Word)
    }
}

impl PlaybackConfig {
    /// Preset delays for a mode, default highlight color.
    pub fn for_mode(mode: SegmentMode) -> Self {
        let mut config = Self {
            mode,
            base_delay_ms: 0,
            per_word_delay_ms: 0,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
        };
        config.set_mode(mode);
        config
    }

    /// Switches mode and resets both delays to that mode's presets.
    pub fn set_mode(&mut self, mode: SegmentMode) {
        self.mode = mode;
        match mode {
            SegmentMode::Word => {
                self.base_delay_ms = WORD_BASE_DELAY_MS;
                self.per_word_delay_ms = WORD_PER_WORD_DELAY_MS;
            }
            SegmentMode::Sentence => {
                self.base_delay_ms = SENTENCE_BASE_DELAY_MS;
                self.per_word_delay_ms = SENTENCE_PER_WORD_DELAY_MS;
            }
        }
    }

    pub fn set_base_delay(&mut self, delay_ms: u64) -> Result<(), ConfigError> {
        if delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "base_delay_ms",
                reason: "must be a positive number of milliseconds".to_string(),
            });
        }
        self.base_delay_ms = delay_ms;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "base_delay_ms",
                reason: "must be a positive number of milliseconds".to_string(),
            });
        }
        if self.highlight_color.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "highlight_color",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Master configuration, read from JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,

    /// Single-key shortcuts in the reader (space, enter, escape, ctrl+c/s)
    pub keyboard_shortcuts: bool,

    /// Inline the fixed stylesheet into HTML exports
    pub include_style: bool,

    /// Where exported files are written
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            keyboard_shortcuts: true,
            include_style: true,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// `<config dir>/pacer/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIRNAME).join(CONFIG_FILENAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.playback.validate()?;
        Ok(config)
    }

    /// Loads an explicit path (must exist) or the default path (optional).
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
