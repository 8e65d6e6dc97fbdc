//! Game settings and difficulty presets
//!
//! Settings are read once at startup from an optional JSON block on the page.
//! Nothing is written back: every session starts from the page's config.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{SLIDER_MAX_MS, SLIDER_MIN_MS, SWIPE_THRESHOLD_PX};

/// Difficulty presets, each a starting tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting tick interval (ms per step)
    pub fn base_interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 200,
            Difficulty::Normal => 120,
            Difficulty::Hard => 70,
        }
    }
}

/// Error while reading settings
#[derive(Debug)]
pub enum SettingsError {
    /// Config text is not valid settings JSON
    Parse(serde_json::Error),
    /// A volume outside 0.0 - 1.0
    Volume { field: &'static str, value: f32 },
    /// Swipe threshold must be positive
    SwipeThreshold(f64),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {}", e),
            SettingsError::Volume { field, value } => {
                write!(f, "{} must be between 0.0 and 1.0, got {}", field, value)
            }
            SettingsError::SwipeThreshold(px) => {
                write!(f, "swipe_threshold_px must be positive, got {}", px)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty preset chosen at game start
    pub difficulty: Difficulty,
    /// Speed slider override; replaces the preset's base interval when set
    pub base_interval_ms: Option<u32>,

    // === Input ===
    /// Minimum swipe length (px)
    pub swipe_threshold_px: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            base_interval_ms: None,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::Volume { field, value });
            }
        }
        if !(self.swipe_threshold_px > 0.0) {
            return Err(SettingsError::SwipeThreshold(self.swipe_threshold_px));
        }
        Ok(())
    }

    /// Base interval in force: slider override, else the preset
    pub fn base_interval_ms(&self) -> u32 {
        self.base_interval_ms
            .map(clamp_slider)
            .unwrap_or_else(|| self.difficulty.base_interval_ms())
    }

    /// Choose a new preset; drops any slider override
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.base_interval_ms = None;
    }

    /// Record a slider value, clamped to the slider's range
    pub fn set_slider(&mut self, ms: u32) -> u32 {
        let ms = clamp_slider(ms);
        self.base_interval_ms = Some(ms);
        ms
    }

    /// Effective sound volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Element holding the JSON config
    const CONFIG_ELEMENT_ID: &'static str = "snake-config";

    /// Load settings from the page (WASM only)
    ///
    /// Reads the `#snake-config` JSON block, then lets a `difficulty` query
    /// parameter pick the preset.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let document = window.as_ref().and_then(|w| w.document());

        let mut settings = document
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
            .map(|json| match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring page config: {}", e);
                    Self::default()
                }
            })
            .unwrap_or_default();

        let query = window
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("difficulty"));
        if let Some(name) = query {
            match Difficulty::from_str(&name) {
                Some(difficulty) => settings.apply_difficulty(difficulty),
                None => log::warn!("Unknown difficulty '{}'", name),
            }
        }

        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} on native, using defaults", Self::CONFIG_ELEMENT_ID);
        Self::default()
    }
}

fn clamp_slider(ms: u32) -> u32 {
    ms.clamp(SLIDER_MIN_MS, SLIDER_MAX_MS)
}
