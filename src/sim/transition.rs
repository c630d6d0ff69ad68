//! Coin state transitions
//!
//! Each transition mutates the state in place and returns the physics
//! command the caller must apply, if any. Nothing here touches the physics
//! engine, audio or a rendering surface.

use glam::Vec2;

use super::boundary::is_out_of_bounds;
use super::gravity::GravityVector;
use super::rect::Rect;
use super::state::{AppState, CoinPhase, PhysicsCommand};

/// Shake toggles the coin in and out of view
pub fn shake(state: &mut AppState) -> Option<PhysicsCommand> {
    match state.phase {
        CoinPhase::Hidden => {
            state.phase = CoinPhase::Simulating;
            log::debug!("Shake: coin shown");
            Some(PhysicsCommand::Start)
        }
        // A shake mid-drag wins; later drag events are ignored while hidden
        CoinPhase::Dragging | CoinPhase::Simulating => {
            state.phase = CoinPhase::Hidden;
            state.recenter_coin();
            log::debug!("Shake: coin hidden");
            Some(PhysicsCommand::Stop)
        }
    }
}

/// Drag began or moved by an incremental `delta`
pub fn drag_moved(state: &mut AppState, delta: Vec2) -> Option<PhysicsCommand> {
    let command = match state.phase {
        CoinPhase::Hidden => return None,
        CoinPhase::Simulating => Some(PhysicsCommand::Stop),
        CoinPhase::Dragging => None,
    };

    state.phase = CoinPhase::Dragging;
    state.coin.halt();
    state.coin.frame.translate(delta);
    command
}

/// Drag released: back to simulation, or hidden if dropped off screen
pub fn drag_ended(state: &mut AppState) -> Option<PhysicsCommand> {
    if state.is_hidden() {
        return None;
    }

    if is_out_of_bounds(&state.coin.frame, &state.container) {
        // Physics must be stopped before the frame is reset
        state.phase = CoinPhase::Hidden;
        state.recenter_coin();
        log::debug!("Drag ended out of bounds: coin hidden");
        Some(PhysicsCommand::Stop)
    } else {
        state.phase = CoinPhase::Simulating;
        Some(PhysicsCommand::Start)
    }
}

/// Latest gravity sample overwrites the simulated direction
pub fn set_gravity(state: &mut AppState, gravity: GravityVector) {
    state.gravity = gravity;
}

/// Container bounds changed (layout pass); the coin is recentred
pub fn relayout(state: &mut AppState, container: Rect) {
    state.container = container;
    state.recenter_coin();
}
