//! Game settings and preferences
//!
//! Stored as a small JSON file. Missing fields take their defaults, so an
//! empty object is a valid settings file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROWTH_ROUNDS_PER_CELL, MAX_PLACEMENT_ATTEMPTS};
use crate::sim::course::GenerationParams;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed round seed; a fresh one is picked per run when unset
    pub seed: Option<u64>,

    // === Course generation ===
    /// Placement attempts per obstacle before it is dropped
    pub placement_attempts: u32,
    /// Region growth pick budget, per requested obstacle cell
    pub growth_rounds_per_cell: usize,

    // === Autoplay ===
    /// Let the autoplayer spend the +1 bonus when it helps
    pub autoplay_bonus: bool,
    /// Safety cap on autoplay actions for a whole round
    pub autoplay_action_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            growth_rounds_per_cell: GROWTH_ROUNDS_PER_CELL,

            autoplay_bonus: true,
            autoplay_action_limit: 10_000,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.placement_attempts == 0 {
            return Err(SettingsError::Zero("placement_attempts"));
        }
        if self.growth_rounds_per_cell == 0 {
            return Err(SettingsError::Zero("growth_rounds_per_cell"));
        }
        if self.autoplay_action_limit == 0 {
            return Err(SettingsError::Zero("autoplay_action_limit"));
        }
        Ok(())
    }

    /// Course generation knobs
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            placement_attempts: self.placement_attempts,
            growth_rounds_per_cell: self.growth_rounds_per_cell,
        }
    }

    /// Read settings from `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
