//! Runner settings and preferences
//!
//! Read from a JSON file next to the binary. Anything missing falls back to
//! its default, and an unreadable file means "use the defaults".

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::ControlScheme;
use crate::tuning::Tuning;

/// Default settings file name
pub const DEFAULT_SETTINGS_PATH: &str = "star_strike_settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Control mode picked on the start screen
    pub control_scheme: ControlScheme,
    /// Fixed run seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Let the demo AI drive
    pub autopilot: bool,
    /// Safety cap for headless runs
    pub max_frames: u32,
    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::AxisLocked,
            seed: None,
            autopilot: true,
            max_frames: 60 * 90,
            tuning: Tuning::default(),
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

    /// Load settings from disk, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
