//! Game settings and preferences
//!
//! Persisted separately from game saves, as JSON in the platform data
//! directory. Load/save degrade to defaults instead of failing.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on solid-brick impacts
    pub screen_shake: bool,
    /// Confuse/chaos post-processing effects
    pub post_effects: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Accessibility ===
    /// Reduced motion (minimize shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            post_effects: true,
            show_fps: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective post effects (respects reduced_motion)
    pub fn effective_post_effects(&self) -> bool {
        self.post_effects && !self.reduced_motion
    }

    fn file_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("brickout").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            log::warn!("could not determine data directory for settings");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("failed to parse settings: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read settings file: {e}");
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            log::warn!("could not determine data directory for settings");
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::warn!("failed to create settings directory: {e}");
            return;
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    log::warn!("failed to write settings: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize settings: {e}"),
        }
    }
}
