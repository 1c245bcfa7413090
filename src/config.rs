//! Configuration for the gesture agent.

use crate::selector::{SelectionMode, DEFAULT_ACTIVITY_FALLOFF};
use crate::voice::{DEFAULT_ATTENTION_WINDOW, DEFAULT_MIN_CONFIDENCE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Angle thresholds (degrees) partitioning each gesture axis into zones.
///
/// Defaults match the angles the stock gestures were tuned with: an arm
/// hanging within 60° of the spine reads as "in", beyond 120° as "out"; a
/// forearm folded within 20° of the upper arm reads as "up", opened past
/// 120° as "down".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureThresholds {
    pub arm_in: f64,
    pub arm_out: f64,
    pub forearm_up: f64,
    pub forearm_down: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            arm_in: 60.0,
            arm_out: 120.0,
            forearm_up: 20.0,
            forearm_down: 120.0,
        }
    }
}

impl GestureThresholds {
    /// The zone partition only makes sense when the lower threshold of each
    /// axis is strictly below the upper one; anything else is a fatal
    /// construction error, caught before any frame is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arm_in < self.arm_out) {
            return Err(ConfigError::InvalidThresholds(format!(
                "arm_in ({}) must be below arm_out ({})",
                self.arm_in, self.arm_out
            )));
        }
        if !(self.forearm_up < self.forearm_down) {
            return Err(ConfigError::InvalidThresholds(format!(
                "forearm_up ({}) must be below forearm_down ({})",
                self.forearm_up, self.forearm_down
            )));
        }
        Ok(())
    }
}

/// Skeleton selection parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Ranking strategy.
    pub mode: SelectionMode,
    /// How many bodies may drive the pipeline per frame (1 or 2).
    pub max_tracked: usize,
    /// Per-frame decay applied to activity levels (most-active mode).
    pub activity_falloff: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Closest,
            max_tracked: 1,
            activity_falloff: DEFAULT_ACTIVITY_FALLOFF,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=2).contains(&self.max_tracked) {
            return Err(ConfigError::InvalidSelection(format!(
                "max_tracked must be 1 or 2, got {}",
                self.max_tracked
            )));
        }
        if !(0.0 < self.activity_falloff && self.activity_falloff < 1.0) {
            return Err(ConfigError::InvalidSelection(format!(
                "activity_falloff must be in (0, 1), got {}",
                self.activity_falloff
            )));
        }
        Ok(())
    }
}

/// Main configuration for the gesture agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gesture zone thresholds.
    pub thresholds: GestureThresholds,

    /// Skeleton selection parameters.
    pub selection: SelectionConfig,

    /// Seconds a voice command stays accepted after the wake phrase.
    pub attention_window_secs: u64,

    /// Minimum recognizer confidence for a phrase to count.
    pub min_confidence: f64,

    /// Whether gesture-driven transmission starts enabled.
    pub follow_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: GestureThresholds::default(),
            selection: SelectionConfig::default(),
            attention_window_secs: DEFAULT_ATTENTION_WINDOW.as_secs(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            follow_on_start: false,
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to the
    /// defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("robogesture-agent")
            .join("config.json")
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.selection.validate()?;
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidSelection(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    InvalidThresholds(String),
    InvalidSelection(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::InvalidThresholds(e) => write!(f, "Invalid thresholds: {e}"),
            ConfigError::InvalidSelection(e) => write!(f, "Invalid selection config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.selection.max_tracked, 1);
        assert_eq!(config.attention_window_secs, 20);
    }

    #[test]
    fn test_threshold_ordering_is_enforced() {
        let mut thresholds = GestureThresholds::default();
        thresholds.arm_in = thresholds.arm_out;
        assert!(thresholds.validate().is_err());

        let thresholds = GestureThresholds {
            forearm_up: 130.0,
            forearm_down: 120.0,
            ..GestureThresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_selection_bounds() {
        let mut selection = SelectionConfig::default();
        selection.max_tracked = 0;
        assert!(selection.validate().is_err());

        selection.max_tracked = 3;
        assert!(selection.validate().is_err());

        selection.max_tracked = 2;
        assert!(selection.validate().is_ok());

        selection.activity_falloff = 1.0;
        assert!(selection.validate().is_err());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert!(back.validate().is_ok());
        assert_eq!(back.thresholds.arm_in, config.thresholds.arm_in);
        assert_eq!(back.selection.mode, config.selection.mode);
    }
}
