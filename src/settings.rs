//! Engine settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults and
//! an unreadable file falls back to the defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{TICK_MS, TORPEDO_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for explosion debris
    pub seed: u64,
    /// Wall-clock length of one simulation step (ms)
    pub tick_ms: f64,
    /// Submarine torpedo cooldown (ms)
    pub torpedo_interval_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_ms: TICK_MS,
            torpedo_interval_ms: TORPEDO_INTERVAL_MS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read {}: {e}, using default settings", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
