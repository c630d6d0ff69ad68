//! Device-motion sampling
//!
//! A `MotionSource` is polled at a fixed interval; each sample's gravity
//! reading becomes an `InputEvent::Gravity` on the event bus. Bad samples
//! are logged and dropped, never retried.

pub mod sampler;
pub mod shake;
pub mod simulated;

use glam::Vec3;

use crate::error::MotionError;
use crate::events::InputEvent;
use crate::sim::GravityVector;

pub use sampler::Sampler;
pub use shake::ShakeDetector;
pub use simulated::SimulatedMotion;

/// One device-motion reading, in g
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceMotion {
    /// Gravity component of acceleration, device axes (+y towards the top)
    pub gravity: Option<Vec3>,
    /// Acceleration the user imparts, gravity removed
    pub user_acceleration: Option<Vec3>,
}

/// Standard gravity, m/s²
pub const STANDARD_GRAVITY: f32 = 9.80665;

impl DeviceMotion {
    /// Build a reading from the browser `devicemotion` event.
    ///
    /// Browsers report the reaction to gravity in m/s² (+y up when the device
    /// is upright), so gravity in g is the negated, rescaled value.
    pub fn from_web(
        including_gravity: Option<Vec3>,
        acceleration: Option<Vec3>,
    ) -> Result<Self, MotionError> {
        let including_gravity = including_gravity.ok_or_else(|| {
            MotionError::ReadFailed("event has no accelerationIncludingGravity".into())
        })?;
        let user_acceleration = acceleration.map(|a| a / STANDARD_GRAVITY);
        let linear = acceleration.unwrap_or(Vec3::ZERO);

        Ok(Self {
            gravity: Some(-(including_gravity - linear) / STANDARD_GRAVITY),
            user_acceleration,
        })
    }
}

/// Something that can be polled for device motion
pub trait MotionSource: Send {
    /// Whether the hardware can deliver motion at all
    fn is_available(&self) -> bool {
        true
    }

    fn read(&mut self) -> Result<DeviceMotion, MotionError>;
}

/// Turn one sensor sample into the gravity event for the update loop.
///
/// Error samples and samples without a gravity reading yield `None`.
pub fn sample_to_event(sample: Result<DeviceMotion, MotionError>) -> Option<InputEvent> {
    let motion = match sample {
        Ok(motion) => motion,
        Err(e) => {
            log::warn!("Dropping motion sample: {}", e);
            return None;
        }
    };

    let Some(gravity) = motion.gravity else {
        log::debug!("Motion sample has no gravity reading");
        return None;
    };

    Some(InputEvent::Gravity(GravityVector::from_sensor(
        gravity.x, gravity.y,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_sample_maps_to_screen() {
        let sample = Ok(DeviceMotion {
            gravity: Some(Vec3::new(0.5, -0.3, -0.8)),
            user_acceleration: None,
        });
        assert_eq!(
            sample_to_event(sample),
            Some(InputEvent::Gravity(GravityVector::new(0.5, 0.3)))
        );
    }

    #[test]
    fn test_error_sample_dropped() {
        let sample = Err(MotionError::ReadFailed("sensor glitch".into()));
        assert_eq!(sample_to_event(sample), None);
    }

    #[test]
    fn test_web_reading_upright() {
        let motion = DeviceMotion::from_web(
            Some(Vec3::new(0.0, STANDARD_GRAVITY, 0.0)),
            Some(Vec3::ZERO),
        )
        .expect("reading present");
        assert_eq!(
            sample_to_event(Ok(motion)),
            Some(InputEvent::Gravity(GravityVector::new(0.0, 1.0)))
        );
    }

    #[test]
    fn test_web_reading_removes_user_acceleration() {
        let shake = Vec3::new(2.0 * STANDARD_GRAVITY, 0.0, 0.0);
        let motion = DeviceMotion::from_web(
            Some(Vec3::new(0.0, STANDARD_GRAVITY, 0.0) + shake),
            Some(shake),
        )
        .expect("reading present");
        let gravity = motion.gravity.expect("gravity present");
        assert!(gravity.x.abs() < 1e-5);
        assert!((motion.user_acceleration.expect("present").length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_web_reading_missing() {
        assert!(DeviceMotion::from_web(None, None).is_err());
    }

    #[test]
    fn test_sample_without_gravity_dropped() {
        assert_eq!(sample_to_event(Ok(DeviceMotion::default())), None);
    }
}
