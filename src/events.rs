//! Input events and the channel that carries them to the update loop.
//!
//! Producers (the motion sampler thread, DOM callbacks) publish through a
//! cloneable `EventPublisher`; the single owner of the app state drains the
//! `EventBus` once per frame and applies events in arrival order.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use glam::Vec2;

use crate::sim::{GravityVector, Rect};

/// Everything that can change the coin's state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Shake gesture
    Shake,
    /// Pan began or moved by an incremental translation
    DragChanged { delta: Vec2 },
    /// Pan released
    DragEnded,
    /// New gravity direction from the motion sensor
    Gravity(GravityVector),
    /// Container bounds changed
    Resize(Rect),
}

/// Unbounded multi-producer, single-consumer event channel
pub struct EventBus {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle that can be cloned and sent to other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Next pending event, without blocking
    pub fn try_recv(&self) -> Option<InputEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus holds its own sender, so this cannot disconnect
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events in arrival order
    pub fn drain(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe sending half of the bus
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<InputEvent>,
}

impl EventPublisher {
    /// Queue an event. Never blocks.
    ///
    /// Returns `false` once the bus has been dropped.
    pub fn publish(&self, event: InputEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        assert!(publisher.publish(InputEvent::Shake));
        assert!(publisher.publish(InputEvent::Gravity(GravityVector::new(0.1, 0.2))));
        assert!(publisher.publish(InputEvent::DragEnded));

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::Shake,
                InputEvent::Gravity(GravityVector::new(0.1, 0.2)),
                InputEvent::DragEnded,
            ]
        );
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_from_thread() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                publisher.publish(InputEvent::Gravity(GravityVector::new(i as f32, 0.0)));
            }
        });
        handle.join().expect("publisher thread panicked");

        let events = bus.drain();
        assert_eq!(events.len(), 10);
        assert_eq!(events[9], InputEvent::Gravity(GravityVector::new(9.0, 0.0)));
    }

    #[test]
    fn test_publish_after_bus_dropped() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        drop(bus);
        assert!(!publisher.publish(InputEvent::Shake));
    }
}
