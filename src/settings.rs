//! Player preferences
//!
//! Read once at startup; gameplay constants are not configurable.
//! Native builds read `breakout.json` from the working directory, the web
//! build reads LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Ring the terminal bell in place of sound effects (native only)
    pub terminal_bell: bool,

    // === Controls ===
    /// Stop the paddle when its arrow key is released. Off keeps the
    /// paddle sliding until the other arrow is pressed.
    pub paddle_stops_on_release: bool,

    // === Terminal ===
    /// Target frame time in milliseconds
    pub frame_millis: u64,
    /// Playfield pixels per terminal column
    pub cell_width: u32,
    /// Playfield pixels per terminal row
    pub cell_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            terminal_bell: false,

            paddle_stops_on_release: false,

            frame_millis: 16,
            cell_width: 4,
            cell_height: 12,
        }
    }
}

impl Settings {
    /// Settings file name (native)
    pub const FILE_NAME: &'static str = "breakout.json";

    /// LocalStorage key (web)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "breakout_settings";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Clamp values that would break audio or the terminal grid
    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.cell_width = self.cell_width.max(1);
        self.cell_height = self.cell_height.max(1);
    }

    /// Effective effect volume after mute
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Parse a stored document, falling back to defaults on error
    fn parse_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", source);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::parse_or_default(&json, "LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from `breakout.json` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::FILE_NAME))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::parse_or_default(&json, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
