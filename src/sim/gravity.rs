//! Simulated gravity direction

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D gravity direction in screen coordinates, unit scale ~[-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityVector {
    pub dx: f32,
    pub dy: f32,
}

impl Default for GravityVector {
    /// Straight down
    fn default() -> Self {
        Self { dx: 0.0, dy: 1.0 }
    }
}

impl GravityVector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Map a sensor gravity reading to screen space.
    ///
    /// The sensor's y axis points up the screen; screen y points down.
    #[inline]
    pub fn from_sensor(x: f32, y: f32) -> Self {
        Self { dx: x, dy: -y }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}
