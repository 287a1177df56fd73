//! Player preferences
//!
//! Persisted as JSON separately from tuning and the high score.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Window sizes offered in the settings menu
pub const RESOLUTION_PRESETS: [(u32, u32); 3] = [(1280, 720), (1600, 900), (1920, 1080)];

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Index into [`RESOLUTION_PRESETS`]
    pub resolution: usize,
    pub fullscreen: bool,

    // === Visual Effects ===
    /// Screen shake on boss arrival and meteor impacts
    pub screen_shake: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: 1,
            fullscreen: false,
            screen_shake: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Selected window size; out-of-range indices fall back to the base size
    pub fn window_size(&self) -> (u32, u32) {
        RESOLUTION_PRESETS
            .get(self.resolution)
            .copied()
            .unwrap_or(RESOLUTION_PRESETS[1])
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, using defaults when the file is absent or malformed
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
