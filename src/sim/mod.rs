//! Coin simulation module
//!
//! State machine, boundary policy and dynamics. This module has no
//! rendering, audio or platform dependencies:
//! - Transitions are plain functions over `AppState`
//! - Physics is reached only through the `PhysicsEngine` trait
//! - Edge contacts are reported through `BoundaryContactListener`

pub mod boundary;
pub mod dynamics;
pub mod gravity;
pub mod rect;
pub mod state;
pub mod transition;

pub use boundary::{BoundaryContact, BoundaryContactListener, Edge, is_out_of_bounds};
pub use dynamics::{Dynamics, PhysicsEngine, reflect_velocity};
pub use gravity::GravityVector;
pub use rect::Rect;
pub use state::{AppState, Coin, CoinPhase, PhysicsCommand};
