//! Display settings
//!
//! Supplied by the host as JSON: on the web through the canvas
//! `data-settings` attribute, natively as an optional file path argument.
//! Nothing is written back.

use serde::{Deserialize, Serialize};

/// Display preferences. Missing JSON fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fade the previous frame instead of clearing it (ghosting trails)
    pub motion_trails: bool,
    /// Draw particle bursts
    pub particles: bool,
    /// Text shown while waiting for the start button
    pub prompt: String,
    /// Seed override for reproducible runs (host clock otherwise)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            motion_trails: true,
            particles: true,
            prompt: "Press Start to play!".to_string(),
            seed: None,
        }
    }
}

impl Settings {
    /// Attribute on the canvas element holding the JSON (web only)
    pub const DATA_ATTRIBUTE: &'static str = "data-settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse optional JSON, falling back to defaults on absence or error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings ({}), using defaults", err);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Read settings from the canvas `data-settings` attribute (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::Element) -> Self {
        let json = canvas.get_attribute(Self::DATA_ATTRIBUTE);
        Self::from_json_or_default(json.as_deref())
    }

    /// Read settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::from_json_or_default(None);
        };
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json_or_default(Some(&json)),
            Err(err) => {
                log::warn!("Could not read {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}
