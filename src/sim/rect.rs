//! Axis-aligned rectangles in screen coordinates (origin top-left, +y down)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A view frame or container bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    /// Half extents (semi-axes for an elliptical item)
    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.origin = center - self.size / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }

    #[test]
    fn test_set_center_keeps_size() {
        let mut r = Rect::new(0.0, 0.0, 140.0, 140.0);
        r.set_center(Vec2::new(200.0, 300.0));
        assert_eq!(r.origin, Vec2::new(130.0, 230.0));
        assert_eq!(r.size, Vec2::new(140.0, 140.0));
        assert_eq!(Rect::from_center(Vec2::new(200.0, 300.0), r.size), r);
    }
}
