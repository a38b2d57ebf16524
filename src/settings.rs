//! Game settings and preferences
//!
//! Persisted as JSON: a file next to the executable's working directory on
//! native, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles drawn for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 400,
            QualityPreset::High => 1000,
        }
    }

    /// Fraction of trail segments drawn (1.0 = all)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.34,
            QualityPreset::Medium => 0.5,
            QualityPreset::High => 1.0,
        }
    }

    /// Whether to render the starfield
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }

    /// Triangles per disc (ball, trail, stars)
    pub fn circle_segments(&self) -> usize {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 24,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ball trail
    pub trails: bool,
    /// Brick break sparks
    pub particles: bool,
    /// Falling stars behind the playfield
    pub starfield: bool,
    /// Floating "+10" over broken bricks
    pub score_popups: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Last mute toggle, restored on startup
    pub muted: bool,

    // === Window ===
    /// Start native builds fullscreen
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Visual effects - all on by default
            trails: true,
            particles: true,
            starfield: true,
            score_popups: true,

            // HUD
            show_fps: false,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            fullscreen: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.starfield = preset.starfield_enabled();
    }

    /// Effective particle draw cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether stars are drawn at all
    pub fn effective_starfield(&self) -> bool {
        self.starfield && self.quality.starfield_enabled()
    }

    /// Draw every n-th trail segment
    pub fn trail_stride(&self) -> usize {
        (1.0 / self.quality.trail_quality()).round().max(1.0) as usize
    }

    /// Final gain for sound effects
    pub fn effective_sfx_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Final gain for music
    pub fn effective_music_volume(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }

    /// Parse stored JSON, falling back to defaults when corrupt
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {}", e);
                Self::default()
            }
        }
    }

    /// Apply the quality override from the environment, if any
    pub fn apply_quality_override(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            return;
        };
        match QualityPreset::from_str(value) {
            Some(preset) => {
                log::info!("Quality override: {}", preset.as_str());
                self.apply_preset(preset);
            }
            None => log::warn!("Unknown quality '{}', keeping {}", value, self.quality.as_str()),
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "brickbreaker_settings";

    /// Settings file, relative to the working directory
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_NAME: &'static str = "brickbreaker_settings.json";

    /// Environment variable overriding the quality preset
    #[cfg(not(target_arch = "wasm32"))]
    const QUALITY_ENV: &'static str = "BRICKBREAKER_QUALITY";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write settings to LocalStorage");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Load settings from the JSON file, then apply the env override
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => {
                log::info!("Loaded settings from {}", Self::FILE_NAME);
                Self::from_json(&json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", Self::FILE_NAME, e);
                Self::default()
            }
        };

        let env_quality = std::env::var(Self::QUALITY_ENV).ok();
        settings.apply_quality_override(env_quality.as_deref());
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize settings: {}", e);
                return;
            }
        };
        match std::fs::write(Self::FILE_NAME, json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not write {}: {}", Self::FILE_NAME, e),
        }
    }
}
