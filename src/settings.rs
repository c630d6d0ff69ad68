//! Preferences
//!
//! Persisted in LocalStorage on the web and in an optional JSON file next to
//! the native binary. Anything missing or malformed falls back to defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::motion::ShakeDetector;
use crate::sim::Dynamics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Motion ===
    /// Device-motion sampling period (ms)
    pub sample_interval_ms: u64,
    /// Shake threshold in g (platforms without a native shake event)
    pub shake_threshold: f32,
    /// Quiet period after a shake (ms)
    pub shake_cooldown_ms: u64,

    // === Coin ===
    /// Coin diameter in points
    pub coin_diameter: f32,
    /// Points/s² for a unit gravity vector
    pub gravity_scale: f32,
    /// Bounciness against the screen edges (0.0 - 1.0)
    pub restitution: f32,

    // === Audio ===
    /// Sound played on edge contact; `None` disables it
    pub collision_sound: Option<String>,
    /// Volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sample_interval_ms: MOTION_SAMPLE_INTERVAL.as_millis() as u64,
            shake_threshold: SHAKE_THRESHOLD,
            shake_cooldown_ms: SHAKE_COOLDOWN_MS,

            coin_diameter: COIN_DIAMETER,
            gravity_scale: GRAVITY_SCALE,
            restitution: RESTITUTION,

            collision_sound: Some(COLLISION_SOUND.to_string()),
            volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Clamp every value into its usable range
    pub fn validate(&mut self) {
        self.sample_interval_ms = self.sample_interval_ms.clamp(1, 1000);
        self.shake_threshold = self.shake_threshold.max(0.1);
        self.coin_diameter = self.coin_diameter.clamp(8.0, 1024.0);
        self.gravity_scale = self.gravity_scale.max(0.0);
        self.restitution = self.restitution.clamp(0.0, 1.0);
        self.volume = self.volume.clamp(0.0, 1.0);
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn shake_detector(&self) -> ShakeDetector {
        ShakeDetector::new(
            self.shake_threshold,
            Duration::from_millis(self.shake_cooldown_ms),
        )
    }

    pub fn dynamics(&self) -> Dynamics {
        Dynamics::new(self.gravity_scale, self.restitution)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "coin_magic_settings";

    /// Settings file read by the native binary
    pub const FILE_NAME: &'static str = "coin_magic.json";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
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
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from `path`, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match Self::read_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::FILE_NAME))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn read_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
