//! # Configuration
//!
//! Player settings and game tuning, optionally read from a YAML file:
//!
//! ```yaml
//! notes-in-level: 12
//! coin-reward: 10
//! seed: 42
//! settings:
//!   volume: 0.5
//!   show-hints: false
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::TrainerError;

/// Notes the player must name to finish a level
pub const DEFAULT_NOTES_IN_LEVEL: u32 = 10;

/// Pig coins paid out per correct answer
pub const DEFAULT_COIN_REWARD: u32 = 10;

/// Player-facing settings, persisted with the save data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub volume: f32,
    pub sound_effects: bool,
    pub music_enabled: bool,
    pub show_hints: bool,
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            sound_effects: true,
            music_enabled: true,
            show_hints: true,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Set the volume, clamped to 0.0-1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    /// Copy with out-of-range values pulled back into range.
    pub fn sanitized(mut self) -> Self {
        self.volume = clamp_volume(self.volume);
        self
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        Settings::default().volume
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Game tuning plus initial settings
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub notes_in_level: u32,
    pub coin_reward: u32,
    pub seed: Option<u64>,
    pub settings: Settings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            notes_in_level: DEFAULT_NOTES_IN_LEVEL,
            coin_reward: DEFAULT_COIN_REWARD,
            seed: None,
            settings: Settings::default(),
        }
    }
}

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawConfig {
    notes_in_level: Option<u32>,
    coin_reward: Option<u32>,
    seed: Option<u64>,
    settings: Option<RawSettings>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawSettings {
    volume: Option<f32>,
    sound_effects: Option<bool>,
    music_enabled: Option<bool>,
    show_hints: Option<bool>,
    high_contrast: Option<bool>,
}

impl GameConfig {
    /// Parse YAML config content.
    ///
    /// # Errors
    /// Returns [`TrainerError::Config`] for malformed YAML or a zero
    /// `notes-in-level`.
    pub fn from_yaml(content: &str) -> Result<Self, TrainerError> {
        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| TrainerError::Config(e.to_string()))?;

        let defaults = Self::default();

        let notes_in_level = raw.notes_in_level.unwrap_or(defaults.notes_in_level);
        if notes_in_level == 0 {
            return Err(TrainerError::Config(
                "notes-in-level must be at least 1".to_string(),
            ));
        }

        let settings = match raw.settings {
            Some(s) => {
                let base = defaults.settings;
                Settings {
                    volume: s.volume.unwrap_or(base.volume),
                    sound_effects: s.sound_effects.unwrap_or(base.sound_effects),
                    music_enabled: s.music_enabled.unwrap_or(base.music_enabled),
                    show_hints: s.show_hints.unwrap_or(base.show_hints),
                    high_contrast: s.high_contrast.unwrap_or(base.high_contrast),
                }
                .sanitized()
            }
            None => defaults.settings,
        };

        Ok(Self {
            notes_in_level,
            coin_reward: raw.coin_reward.unwrap_or(defaults.coin_reward),
            seed: raw.seed,
            settings,
        })
    }
}
