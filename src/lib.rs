//! Coin Magic - a coin that rolls around the screen under device gravity
//!
//! Core modules:
//! - `sim`: Coin state machine, boundary policy and the built-in dynamics
//! - `motion`: Device-motion sampling, gravity extraction, shake detection
//! - `events`: Channel carrying input events to the update loop
//! - `controller`: Owns the state and applies transitions and physics
//! - `feedback`: Collision sound feedback
//! - `settings`: Persisted preferences

pub mod controller;
pub mod error;
pub mod events;
pub mod feedback;
pub mod motion;
pub mod settings;
pub mod sim;

pub use controller::Controller;
pub use error::{MotionError, SettingsError};
pub use events::{EventBus, EventPublisher, InputEvent};
pub use settings::Settings;

/// Configuration constants
pub mod consts {
    use std::time::Duration;

    /// Device-motion sampling period
    pub const MOTION_SAMPLE_INTERVAL: Duration = Duration::from_millis(10);

    /// Fixed physics timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the controller will simulate
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Coin image size in points
    pub const COIN_DIAMETER: f32 = 140.0;

    /// Points/s² produced by a unit gravity vector
    pub const GRAVITY_SCALE: f32 = 1000.0;
    /// Fraction of normal speed kept after hitting an edge
    pub const RESTITUTION: f32 = 0.5;
    /// Normal speeds below this after a bounce are zeroed (points/s)
    pub const REST_SPEED: f32 = 15.0;
    /// Distance from an edge still counted as touching it (points)
    pub const CONTACT_EPSILON: f32 = 1.0;

    /// Bundled sound played on boundary contact
    pub const COLLISION_SOUND: &str = "collision.wav";

    /// User-acceleration magnitude (in g) that counts as a shake
    pub const SHAKE_THRESHOLD: f32 = 2.0;
    /// Quiet period after a shake fires (ms)
    pub const SHAKE_COOLDOWN_MS: u64 = 500;
}
