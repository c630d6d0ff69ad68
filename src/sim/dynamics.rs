//! Built-in dynamics: one coin under gravity inside the container
//!
//! The coin's collision bounds are elliptical. Against the axis-aligned
//! container walls the support extent of the ellipse is its semi-axis, so
//! the frame's half size is all the wall test needs.

use std::f32::consts::TAU;

use super::boundary::{BoundaryContact, BoundaryContactListener, Edge, is_out_of_bounds};
use super::gravity::GravityVector;
use super::rect::Rect;
use super::state::Coin;
use crate::consts::*;

use glam::Vec2;

/// Gravity and boundary-collision behaviors for the coin
pub trait PhysicsEngine {
    /// Attach the gravity and collision behaviors
    fn start(&mut self);
    /// Remove all behaviors; stepping becomes a no-op
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Advance the coin by `dt` seconds, reporting edges it begins touching
    fn step(
        &mut self,
        coin: &mut Coin,
        container: &Rect,
        gravity: GravityVector,
        dt: f32,
        listener: &mut dyn BoundaryContactListener,
    );
}

/// Reflect velocity off a surface, keeping `restitution` of the normal speed
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// Simple explicit-Euler engine for a single body
#[derive(Debug, Clone)]
pub struct Dynamics {
    running: bool,
    gravity_scale: f32,
    restitution: f32,
    /// Edges the coin was touching after the previous step
    touching: [bool; 4],
}

impl Default for Dynamics {
    fn default() -> Self {
        Self::new(GRAVITY_SCALE, RESTITUTION)
    }
}

impl Dynamics {
    pub fn new(gravity_scale: f32, restitution: f32) -> Self {
        Self {
            running: false,
            gravity_scale,
            restitution: restitution.clamp(0.0, 1.0),
            touching: [false; 4],
        }
    }

    /// Edges currently in contact
    pub fn touching(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.into_iter().filter(move |e| self.touching[e.index()])
    }
}

/// Distance from the body's extent to `edge`, positive while inside
fn edge_gap(center: Vec2, half: Vec2, container: &Rect, edge: Edge) -> f32 {
    match edge {
        Edge::Left => (center.x - half.x) - container.left(),
        Edge::Right => container.right() - (center.x + half.x),
        Edge::Top => (center.y - half.y) - container.top(),
        Edge::Bottom => container.bottom() - (center.y + half.y),
    }
}

fn contact_point(center: Vec2, container: &Rect, edge: Edge) -> Vec2 {
    match edge {
        Edge::Left => Vec2::new(container.left(), center.y),
        Edge::Right => Vec2::new(container.right(), center.y),
        Edge::Top => Vec2::new(center.x, container.top()),
        Edge::Bottom => Vec2::new(center.x, container.bottom()),
    }
}

/// Move `frame` back inside `container` after a wall was resolved.
///
/// `center - size / 2 + size` can round one ulp past a flush edge, which the
/// strict out-of-bounds test would treat as outside.
fn pin_inside(frame: &mut Rect, container: &Rect) {
    if !is_out_of_bounds(frame, container) {
        return;
    }
    if frame.size.x <= container.size.x {
        frame.origin.x = pin_axis(frame.origin.x, frame.size.x, container.left(), container.right());
    }
    if frame.size.y <= container.size.y {
        frame.origin.y = pin_axis(frame.origin.y, frame.size.y, container.top(), container.bottom());
    }
}

fn pin_axis(mut origin: f32, size: f32, low: f32, high: f32) -> f32 {
    if origin < low {
        origin = low;
    }
    if origin + size > high {
        origin = high - size;
        let nudge = high.abs().max(1.0) * f32::EPSILON;
        for _ in 0..8 {
            if origin + size <= high {
                break;
            }
            origin -= nudge;
        }
    }
    origin.max(low)
}

/// Spin rate of a disc of `radius` rolling along `edge` (clockwise positive
/// on screen)
fn rolling_rate(vel: Vec2, radius: f32, edge: Edge) -> f32 {
    match edge {
        Edge::Bottom => vel.x / radius,
        Edge::Top => -vel.x / radius,
        Edge::Left => vel.y / radius,
        Edge::Right => -vel.y / radius,
    }
}

impl PhysicsEngine for Dynamics {
    fn start(&mut self) {
        if !self.running {
            log::debug!("Physics started");
        }
        self.running = true;
    }

    fn stop(&mut self) {
        if self.running {
            log::debug!("Physics stopped");
        }
        self.running = false;
        self.touching = [false; 4];
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn step(
        &mut self,
        coin: &mut Coin,
        container: &Rect,
        gravity: GravityVector,
        dt: f32,
        listener: &mut dyn BoundaryContactListener,
    ) {
        if !self.running {
            return;
        }

        coin.vel += gravity.as_vec2() * self.gravity_scale * dt;
        let half = coin.frame.half_size();
        let mut center = coin.frame.center() + coin.vel * dt;

        let mut touching = [false; 4];
        for edge in Edge::ALL {
            let gap = edge_gap(center, half, container, edge);
            if gap < 0.0 {
                let normal = edge.inward_normal();
                center += normal * -gap;

                let normal_speed = coin.vel.dot(normal);
                if normal_speed < 0.0 {
                    coin.vel = reflect_velocity(coin.vel, normal, self.restitution);
                    if normal_speed.abs() * self.restitution < REST_SPEED {
                        coin.vel -= coin.vel.dot(normal) * normal;
                    }
                }
            }
            touching[edge.index()] = gap <= CONTACT_EPSILON;
        }

        coin.frame.set_center(center);
        pin_inside(&mut coin.frame, container);

        let radius = half.min_element().max(f32::EPSILON);
        for edge in Edge::ALL {
            if !touching[edge.index()] {
                continue;
            }
            coin.angular_vel = rolling_rate(coin.vel, radius, edge);
            if !self.touching[edge.index()] {
                listener.on_boundary_contact(BoundaryContact {
                    edge,
                    point: contact_point(center, container, edge),
                });
            }
        }
        coin.angle = (coin.angle + coin.angular_vel * dt).rem_euclid(TAU);

        self.touching = touching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Contacts(Vec<BoundaryContact>);

    impl BoundaryContactListener for Contacts {
        fn on_boundary_contact(&mut self, contact: BoundaryContact) {
            self.0.push(contact);
        }
    }

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 800.0)
    }

    fn run(
        dynamics: &mut Dynamics,
        coin: &mut Coin,
        gravity: GravityVector,
        seconds: f32,
        contacts: &mut Contacts,
    ) {
        let steps = (seconds / SIM_DT) as u32;
        for _ in 0..steps {
            dynamics.step(coin, &screen(), gravity, SIM_DT, contacts);
            assert!(
                coin.frame.left() >= -0.001
                    && coin.frame.top() >= -0.001
                    && coin.frame.right() <= 400.001
                    && coin.frame.bottom() <= 800.001,
                "coin escaped: {:?}",
                coin.frame
            );
        }
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(100.0, 50.0), Vec2::NEG_X, 1.0);
        assert!((reflected.x + 100.0).abs() < 0.001);
        assert!((reflected.y - 50.0).abs() < 0.001);

        let damped = reflect_velocity(Vec2::new(0.0, 200.0), Vec2::NEG_Y, 0.5);
        assert!((damped.y + 100.0).abs() < 0.001);
    }

    #[test]
    fn test_stopped_engine_does_not_move() {
        let mut dynamics = Dynamics::default();
        let mut coin = Coin::new(140.0, screen().center());
        let before = coin.frame;
        let mut contacts = Contacts::default();

        run(&mut dynamics, &mut coin, GravityVector::default(), 1.0, &mut contacts);
        assert_eq!(coin.frame, before);
        assert!(contacts.0.is_empty());
    }

    #[test]
    fn test_falls_and_settles_on_bottom() {
        let mut dynamics = Dynamics::default();
        dynamics.start();
        let mut coin = Coin::new(140.0, screen().center());
        let mut contacts = Contacts::default();

        run(&mut dynamics, &mut coin, GravityVector::default(), 3.0, &mut contacts);
        assert!(!contacts.0.is_empty());
        assert!(contacts.0.iter().all(|c| c.edge == Edge::Bottom));
        assert!((coin.frame.bottom() - 800.0).abs() <= CONTACT_EPSILON);
        assert_eq!(coin.vel.y, 0.0);

        // Resting contact does not re-fire
        let settled = contacts.0.len();
        run(&mut dynamics, &mut coin, GravityVector::default(), 1.0, &mut contacts);
        assert_eq!(contacts.0.len(), settled);
    }

    #[test]
    fn test_resting_contact_fires_once() {
        let mut dynamics = Dynamics::default();
        dynamics.start();
        let mut coin = Coin::new(140.0, Vec2::new(200.0, 730.0));
        let mut contacts = Contacts::default();

        run(&mut dynamics, &mut coin, GravityVector::default(), 1.0, &mut contacts);
        assert_eq!(contacts.0.len(), 1);
        assert_eq!(contacts.0[0].edge, Edge::Bottom);
        assert_eq!(contacts.0[0].point, Vec2::new(200.0, 800.0));
    }

    #[test]
    fn test_tilt_rolls_into_corner() {
        let mut dynamics = Dynamics::default();
        dynamics.start();
        let mut coin = Coin::new(140.0, Vec2::new(200.0, 730.0));
        let mut contacts = Contacts::default();

        run(&mut dynamics, &mut coin, GravityVector::new(0.7, 0.7), 3.0, &mut contacts);
        let edges: Vec<Edge> = dynamics.touching().collect();
        assert!(edges.contains(&Edge::Right));
        assert!(edges.contains(&Edge::Bottom));
        assert!(contacts.0.iter().any(|c| c.edge == Edge::Right));
    }

    #[test]
    fn test_rolling_spins_clockwise() {
        let mut dynamics = Dynamics::default();
        dynamics.start();
        let mut coin = Coin::new(140.0, Vec2::new(100.0, 730.0));
        let mut contacts = Contacts::default();

        // Mostly down with a push to the right: rolls along the floor
        run(&mut dynamics, &mut coin, GravityVector::new(0.2, 1.0), 0.2, &mut contacts);
        assert!(coin.vel.x > 0.0);
        assert!(coin.angular_vel > 0.0);
    }

    #[test]
    fn test_resting_coin_never_outside_fractional_container() {
        for (w, h) in [(375.0, 1024.9), (320.5, 568.3), (414.7, 896.1), (390.0, 844.45)] {
            let container = Rect::new(0.0, 0.0, w, h);
            for gravity in [
                GravityVector::default(),
                GravityVector::new(0.7, 0.7),
                GravityVector::new(-0.7, 0.7),
                GravityVector::new(0.3, -1.0),
            ] {
                let mut dynamics = Dynamics::default();
                dynamics.start();
                let mut coin = Coin::new(140.0, container.center());
                for _ in 0..480 {
                    dynamics.step(&mut coin, &container, gravity, SIM_DT, &mut ());
                    assert!(
                        !is_out_of_bounds(&coin.frame, &container),
                        "{:?} outside {:?}",
                        coin.frame,
                        container
                    );
                }
            }
        }
    }

    #[test]
    fn test_pin_axis_lands_flush_or_inside() {
        let high = 1024.9f32;
        let origin = pin_axis(900.0, 140.0, 0.0, high);
        assert!(origin + 140.0 <= high);
        assert!(high - (origin + 140.0) < 0.001);
        assert_eq!(pin_axis(-3.0, 140.0, 0.0, high), 0.0);
    }

    #[test]
    fn test_restart_fires_contact_again() {
        let mut dynamics = Dynamics::default();
        dynamics.start();
        let mut coin = Coin::new(140.0, Vec2::new(200.0, 730.0));
        let mut contacts = Contacts::default();

        run(&mut dynamics, &mut coin, GravityVector::default(), 0.5, &mut contacts);
        dynamics.stop();
        dynamics.start();
        run(&mut dynamics, &mut coin, GravityVector::default(), 0.5, &mut contacts);
        assert_eq!(contacts.0.len(), 2);
    }
}
