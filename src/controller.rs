//! Top-level controller
//!
//! Single owner of the app state. Every mutation happens here, on the thread
//! that owns the controller: input events are routed to the transition
//! functions, the physics commands they return are applied to the engine,
//! and the engine is stepped at a fixed timestep.

use crate::consts::*;
use crate::events::{EventBus, InputEvent};
use crate::settings::Settings;
use crate::sim::transition;
use crate::sim::{
    AppState, BoundaryContactListener, CoinPhase, PhysicsCommand, PhysicsEngine, Rect,
};

pub struct Controller<P, L> {
    state: AppState,
    physics: P,
    feedback: L,
    accumulator: f32,
}

impl<P: PhysicsEngine, L: BoundaryContactListener> Controller<P, L> {
    /// Hidden coin centred in `container`
    pub fn new(settings: &Settings, container: Rect, physics: P, feedback: L) -> Self {
        Self {
            state: AppState::new(container, settings.coin_diameter),
            physics,
            feedback,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> CoinPhase {
        self.state.phase
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn feedback(&self) -> &L {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut L {
        &mut self.feedback
    }

    /// Apply one input event
    pub fn handle(&mut self, event: InputEvent) {
        let command = match event {
            InputEvent::Shake => transition::shake(&mut self.state),
            InputEvent::DragChanged { delta } => transition::drag_moved(&mut self.state, delta),
            InputEvent::DragEnded => transition::drag_ended(&mut self.state),
            InputEvent::Gravity(gravity) => {
                transition::set_gravity(&mut self.state, gravity);
                None
            }
            InputEvent::Resize(container) => {
                // Frame changes must not race the running simulation
                self.physics.stop();
                transition::relayout(&mut self.state, container);
                (self.state.phase == CoinPhase::Simulating).then_some(PhysicsCommand::Start)
            }
        };

        if let Some(command) = command {
            self.apply(command);
        }
    }

    /// Apply every pending event on the bus, in arrival order
    pub fn drain(&mut self, bus: &EventBus) -> usize {
        let events = bus.drain();
        let count = events.len();
        for event in events {
            self.handle(event);
        }
        count
    }

    fn apply(&mut self, command: PhysicsCommand) {
        match command {
            PhysicsCommand::Start => self.physics.start(),
            PhysicsCommand::Stop => {
                self.physics.stop();
                self.accumulator = 0.0;
            }
        }
    }

    /// Advance physics by a frame's worth of wall time
    pub fn update(&mut self, frame_dt: f32) {
        if self.state.phase != CoinPhase::Simulating || !self.physics.is_running() {
            self.accumulator = 0.0;
            return;
        }

        if !frame_dt.is_finite() {
            log::warn!("Ignoring frame delta {}", frame_dt);
            return;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.physics.step(
                &mut self.state.coin,
                &self.state.container,
                self.state.gravity,
                SIM_DT,
                &mut self.feedback,
            );
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}
