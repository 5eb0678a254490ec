//! Engine configuration with documented defaults
//!
//! Loaded from TOML by the boundary layer; every field falls back to its
//! default when missing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{HexfrontError, Result};
use crate::core::types::Side;

/// AI difficulty setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    /// Digs in one step after every advance
    Hard,
}

impl Difficulty {
    pub fn entrenches_on_advance(&self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

/// Settings for the AI controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Scheduler ticks between two AI decisions
    ///
    /// The default of 22 is roughly three decisions a second at 60 Hz.
    pub cadence_ticks: u32,

    pub difficulty: Difficulty,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            cadence_ticks: 22,
            difficulty: Difficulty::Normal,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the combat dice
    pub seed: u64,

    /// Side driven by the AI controller, if any
    pub ai_side: Option<Side>,

    pub ai: AiConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ai_side: Some(Side::Sov),
            ai: AiConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration values
    ///
    /// Returns an error message if any values are invalid.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.ai.cadence_ticks == 0 {
            return Err("ai.cadence_ticks must be positive".into());
        }
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate().map_err(HexfrontError::InvalidConfig)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ai.cadence_ticks, 22);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config =
            EngineConfig::from_toml_str("seed = 7\n[ai]\ndifficulty = \"hard\"\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.ai.difficulty, Difficulty::Hard);
        assert_eq!(config.ai.cadence_ticks, 22);
        assert_eq!(config.ai_side, Some(Side::Sov));
    }

    #[test]
    fn test_zero_cadence_rejected() {
        let result = EngineConfig::from_toml_str("[ai]\ncadence_ticks = 0\n");
        assert!(matches!(result, Err(HexfrontError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_bundled_config() {
        let config = EngineConfig::load("data/config/engine.toml").expect("bundled config loads");
        assert!(config.validate().is_ok());
    }
}
