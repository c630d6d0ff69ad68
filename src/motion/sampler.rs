//! Worker thread polling a motion source at a fixed interval

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::shake::ShakeDetector;
use super::{MotionSource, sample_to_event};
use crate::error::MotionError;
use crate::events::{EventPublisher, InputEvent};

/// Handle to a running sampler thread.
///
/// The thread runs until the event bus it publishes to is dropped.
pub struct Sampler {
    handle: JoinHandle<()>,
}

impl Sampler {
    /// Start sampling `source` every `interval`.
    ///
    /// With a shake detector attached, user-acceleration spikes are also
    /// published as `InputEvent::Shake`.
    pub fn spawn<S>(
        mut source: S,
        interval: Duration,
        mut shake: Option<ShakeDetector>,
        publisher: EventPublisher,
    ) -> Result<Self, MotionError>
    where
        S: MotionSource + 'static,
    {
        if !source.is_available() {
            return Err(MotionError::Unavailable);
        }

        let handle = thread::Builder::new()
            .name("motion-sampler".into())
            .spawn(move || {
                let started = Instant::now();
                while poll_once(&mut source, shake.as_mut(), started.elapsed(), &publisher) {
                    thread::sleep(interval);
                }
                log::debug!("Motion sampler stopped (event bus closed)");
            })?;

        log::info!("Motion sampler running every {:?}", interval);
        Ok(Self { handle })
    }

    /// Wait for the thread to exit
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("Motion sampler thread panicked");
        }
    }
}

/// Read and forward one sample. Returns false once the bus is gone.
pub fn poll_once<S: MotionSource + ?Sized>(
    source: &mut S,
    shake: Option<&mut ShakeDetector>,
    now: Duration,
    publisher: &EventPublisher,
) -> bool {
    let sample = source.read();

    if let (Some(detector), Ok(motion)) = (shake, &sample) {
        if let Some(acceleration) = motion.user_acceleration {
            if detector.update(acceleration.length(), now) && !publisher.publish(InputEvent::Shake)
            {
                return false;
            }
        }
    }

    match sample_to_event(sample) {
        Some(event) => publisher.publish(event),
        None => true,
    }
}
