//! Game settings and preferences
//!
//! Read from JSON: LocalStorage on the web, a file named by the
//! `DUEL_PONG_SETTINGS` environment variable on native.

use serde::{Deserialize, Serialize};

use crate::sim::Control;

/// Key names (as reported by `KeyboardEvent.key`) bound to each control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub player1_up: String,
    pub player1_down: String,
    pub player2_up: String,
    pub player2_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            player1_up: "w".to_string(),
            player1_down: "s".to_string(),
            player2_up: "ArrowUp".to_string(),
            player2_down: "ArrowDown".to_string(),
        }
    }
}

impl KeyBindings {
    pub fn key_for(&self, control: Control) -> &str {
        match control {
            Control::Player1Up => &self.player1_up,
            Control::Player1Down => &self.player1_down,
            Control::Player2Up => &self.player2_up,
            Control::Player2Down => &self.player2_down,
        }
    }

    /// Control bound to `key`, if any. Matching is exact.
    pub fn control_for(&self, key: &str) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|&control| self.key_for(control) == key)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub key_bindings: KeyBindings,
    /// Fixed RNG seed; time-derived when unset
    pub seed: Option<u64>,
    /// Draw the line splitting the two halves
    pub show_center_line: bool,
    /// Frame budget for the native headless match
    pub demo_max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_bindings: KeyBindings::default(),
            seed: None,
            show_center_line: true,
            demo_max_ticks: 100_000,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                None
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "duel_pong_settings";

    /// Environment variable naming the native settings file
    #[cfg(not(target_arch = "wasm32"))]
    const PATH_ENV: &'static str = "DUEL_PONG_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match json.as_deref().and_then(Self::from_json) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `DUEL_PONG_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::PATH_ENV) {
            Ok(path) => Self::load_from_path(std::path::Path::new(&path)),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Read a settings file, falling back to defaults if it is missing or malformed
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).unwrap_or_default(),
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
