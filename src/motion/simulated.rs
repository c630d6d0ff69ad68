//! Simulated device motion for headless runs
//!
//! Rocks the device slowly left and right with seeded sensor noise, and can
//! inject read failures and shake spikes. Deterministic for a given seed.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{DeviceMotion, MotionSource};
use crate::error::MotionError;

#[derive(Debug, Clone)]
pub struct SimulatedMotion {
    rng: Pcg32,
    /// Samples taken so far
    ticks: u64,
    /// Samples per full left-right rock
    period: u64,
    /// Maximum tilt from upright (radians)
    max_tilt: f32,
    /// Per-axis noise amplitude (g)
    noise: f32,
    /// Chance a read fails
    error_rate: f64,
    /// Sample indices carrying a shake spike
    shakes: Vec<u64>,
}

impl SimulatedMotion {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            ticks: 0,
            period: 400,
            max_tilt: 0.9,
            noise: 0.02,
            error_rate: 0.0,
            shakes: Vec::new(),
        }
    }

    pub fn with_period(mut self, samples: u64) -> Self {
        self.period = samples.max(1);
        self
    }

    pub fn with_error_rate(mut self, rate: f64) -> Self {
        self.error_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Add a shake spike at the given sample index (never a dropout)
    pub fn with_shake_at(mut self, tick: u64) -> Self {
        self.shakes.push(tick);
        self
    }

    /// Current tilt angle: 0 is upright, positive leans right
    fn tilt(&self) -> f32 {
        let phase = (self.ticks % self.period) as f32 / self.period as f32;
        (phase * TAU).sin() * self.max_tilt
    }
}

impl MotionSource for SimulatedMotion {
    fn read(&mut self) -> Result<DeviceMotion, MotionError> {
        let tick = self.ticks;
        self.ticks += 1;

        let shaking = self.shakes.contains(&tick);
        if !shaking && self.error_rate > 0.0 && self.rng.random_bool(self.error_rate) {
            return Err(MotionError::ReadFailed(format!("simulated dropout at sample {tick}")));
        }

        let tilt = self.tilt();
        let mut jitter = || self.rng.random_range(-1.0f32..=1.0) * self.noise;
        let gravity = Vec3::new(tilt.sin() + jitter(), -tilt.cos() + jitter(), jitter());

        let user_acceleration = if shaking {
            Vec3::new(3.0, 0.5, 0.0)
        } else {
            Vec3::ZERO
        };

        Ok(DeviceMotion {
            gravity: Some(gravity),
            user_acceleration: Some(user_acceleration),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_samples() {
        let mut a = SimulatedMotion::new(42).with_error_rate(0.1);
        let mut b = SimulatedMotion::new(42).with_error_rate(0.1);
        for _ in 0..100 {
            let (sa, sb) = (a.read(), b.read());
            assert_eq!(sa.is_ok(), sb.is_ok());
            if let (Ok(sa), Ok(sb)) = (sa, sb) {
                assert_eq!(sa, sb);
            }
        }
    }

    #[test]
    fn test_starts_upright() {
        let mut motion = SimulatedMotion::new(7);
        let sample = motion.read().expect("no errors configured");
        let gravity = sample.gravity.expect("gravity always present");
        assert!(gravity.x.abs() < 0.05);
        assert!((gravity.y + 1.0).abs() < 0.05);
    }

    #[test]
    fn test_shake_spike() {
        let mut motion = SimulatedMotion::new(7).with_shake_at(1);
        let quiet = motion.read().expect("no errors configured");
        let spike = motion.read().expect("no errors configured");
        assert_eq!(quiet.user_acceleration, Some(Vec3::ZERO));
        assert!(spike.user_acceleration.map(|a| a.length()).unwrap_or(0.0) > 2.0);
    }

    #[test]
    fn test_error_rate_one_always_fails() {
        let mut motion = SimulatedMotion::new(1).with_error_rate(1.0);
        assert!(matches!(motion.read(), Err(MotionError::ReadFailed(_))));
    }
}
