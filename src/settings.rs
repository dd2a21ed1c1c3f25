//! Game settings and preferences
//!
//! Persisted separately from the ledger in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, TICK_MS};

/// Bounds applied when loading persisted values, so a corrupt or
/// hand-edited blob can never produce a malformed grid or a runaway tick
/// rate.
const MIN_TICK_MS: u32 = 50;
const MAX_TICK_MS: u32 = 500;
const MIN_CELL_SIZE: u32 = 10;
const MAX_CELL_SIZE: u32 = 50;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Simulation tick interval in milliseconds
    pub tick_ms: u32,
    /// Grid cell edge length in pixels
    pub cell_size: u32,
    /// Draw grid lines behind the play field
    pub show_grid: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            cell_size: CELL_SIZE,
            show_grid: false,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "playpoints_settings";

    /// Clamp numeric fields into playable ranges
    pub fn sanitize(mut self) -> Self {
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        self.cell_size = self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::storage_get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                log::info!("Loaded settings from LocalStorage");
                return settings.sanitize();
            }
        }
        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            crate::platform::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
