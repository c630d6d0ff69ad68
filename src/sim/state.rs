//! Coin state and the application state owned by the controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::GravityVector;
use super::rect::Rect;

/// What the coin is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinPhase {
    /// Not shown; ignores drags
    Hidden,
    /// Following the user's finger, physics suspended
    Dragging,
    /// Under gravity and boundary collision
    Simulating,
}

/// Side effect a transition asks the controller to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicsCommand {
    /// Attach gravity and collision behaviors
    Start,
    /// Remove all behaviors
    Stop,
}

/// The coin body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Current view frame
    pub frame: Rect,
    /// Points per second
    pub vel: Vec2,
    /// Spin angle (radians) from rolling along edges
    pub angle: f32,
    /// Radians per second
    pub angular_vel: f32,
}

impl Coin {
    pub fn new(diameter: f32, center: Vec2) -> Self {
        Self {
            frame: Rect::from_center(center, Vec2::splat(diameter)),
            vel: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
        }
    }

    /// Drop all motion (the body is being placed by hand)
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
    }
}

/// Complete application state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub phase: CoinPhase,
    pub coin: Coin,
    /// Visible screen area, the simulation's boundary
    pub container: Rect,
    /// Last gravity direction applied to the simulation
    pub gravity: GravityVector,
}

impl AppState {
    /// Hidden coin centred in `container`, gravity pointing down
    pub fn new(container: Rect, coin_diameter: f32) -> Self {
        Self {
            phase: CoinPhase::Hidden,
            coin: Coin::new(coin_diameter, container.center()),
            container,
            gravity: GravityVector::default(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == CoinPhase::Hidden
    }

    /// Put the coin back in the middle of the screen, motionless
    pub fn recenter_coin(&mut self) {
        self.coin.frame.set_center(self.container.center());
        self.coin.halt();
    }
}
