//! Shake gesture detection from user acceleration
//!
//! Platforms without a native shake event get one from here: a shake is a
//! user-acceleration spike above a threshold, debounced so one physical
//! shake toggles the coin once.

use std::time::Duration;

use crate::consts::{SHAKE_COOLDOWN_MS, SHAKE_THRESHOLD};

#[derive(Debug, Clone)]
pub struct ShakeDetector {
    /// Magnitude in g that counts as a shake
    threshold: f32,
    cooldown: Duration,
    last_fired: Option<Duration>,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(SHAKE_THRESHOLD, Duration::from_millis(SHAKE_COOLDOWN_MS))
    }
}

impl ShakeDetector {
    pub fn new(threshold: f32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            last_fired: None,
        }
    }

    /// Feed one acceleration magnitude taken at `now` (time since any fixed
    /// epoch). Returns true when this sample is a new shake.
    pub fn update(&mut self, magnitude: f32, now: Duration) -> bool {
        if magnitude < self.threshold {
            return false;
        }

        if let Some(last) = self.last_fired {
            if now.saturating_sub(last) < self.cooldown {
                return false;
            }
        }

        self.last_fired = Some(now);
        true
    }
}
