//! Error types
//!
//! Nothing here is fatal: sensor errors drop a single sample and settings
//! errors fall back to defaults.

/// Failure reading the device-motion sensor
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("device motion is not available")]
    Unavailable,
    #[error("device motion read failed: {0}")]
    ReadFailed(String),
    #[error("failed to start motion sampler: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Failure loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
