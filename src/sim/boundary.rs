//! Boundary policy
//!
//! Decides whether a dragged coin was released outside the screen, and
//! defines the capability the physics engine notifies on edge contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Container edge a body touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Index into per-edge arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Right => 1,
            Edge::Top => 2,
            Edge::Bottom => 3,
        }
    }

    /// Unit normal pointing back into the container
    pub fn inward_normal(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }
}

/// A body began touching a container edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryContact {
    pub edge: Edge,
    /// Contact point on the edge
    pub point: Vec2,
}

/// Receives boundary-contact notifications from the physics engine
pub trait BoundaryContactListener {
    fn on_boundary_contact(&mut self, contact: BoundaryContact);
}

/// Listener that ignores every contact
impl BoundaryContactListener for () {
    fn on_boundary_contact(&mut self, _contact: BoundaryContact) {}
}

/// True iff any edge of `object` lies strictly outside the matching edge of
/// `container`. An edge exactly flush with the container is in bounds.
pub fn is_out_of_bounds(object: &Rect, container: &Rect) -> bool {
    object.left() < container.left()
        || object.right() > container.right()
        || object.top() < container.top()
        || object.bottom() > container.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, 375.0, 667.0)
    }

    #[test]
    fn test_contained_is_in_bounds() {
        let coin = Rect::new(100.0, 100.0, 140.0, 140.0);
        assert!(!is_out_of_bounds(&coin, &screen()));
    }

    #[test]
    fn test_flush_edges_are_in_bounds() {
        let container = screen();
        assert!(!is_out_of_bounds(&container, &container));
        assert!(!is_out_of_bounds(&Rect::new(0.0, 0.0, 140.0, 140.0), &container));
        assert!(!is_out_of_bounds(&Rect::new(235.0, 527.0, 140.0, 140.0), &container));
    }

    #[test]
    fn test_each_edge_violation() {
        let container = screen();
        assert!(is_out_of_bounds(&Rect::new(-0.5, 100.0, 140.0, 140.0), &container));
        assert!(is_out_of_bounds(&Rect::new(235.5, 100.0, 140.0, 140.0), &container));
        assert!(is_out_of_bounds(&Rect::new(100.0, -0.5, 140.0, 140.0), &container));
        assert!(is_out_of_bounds(&Rect::new(100.0, 527.5, 140.0, 140.0), &container));
    }

    #[test]
    fn test_offset_container() {
        let container = Rect::new(50.0, 50.0, 200.0, 200.0);
        assert!(is_out_of_bounds(&Rect::new(40.0, 60.0, 10.0, 10.0), &container));
        assert!(!is_out_of_bounds(&Rect::new(50.0, 60.0, 10.0, 10.0), &container));
    }

    proptest! {
        #[test]
        fn prop_contained_rect_is_in_bounds(
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            cw in 1.0f32..1000.0,
            ch in 1.0f32..1000.0,
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            fw in 0.0f32..=1.0,
            fh in 0.0f32..=1.0,
        ) {
            let container = Rect::new(cx, cy, cw, ch);
            let w = cw * fw;
            let h = ch * fh;
            let x = cx + (cw - w) * fx;
            let y = cy + (ch - h) * fy;
            let object = Rect::new(x, y, w, h);
            // Float rounding can push an edge a hair past the container
            prop_assume!(object.left() >= container.left() && object.right() <= container.right());
            prop_assume!(object.top() >= container.top() && object.bottom() <= container.bottom());
            prop_assert!(!is_out_of_bounds(&object, &container));
        }

        #[test]
        fn prop_single_edge_violation_is_out(
            edge in 0usize..4,
            overshoot in 0.5f32..200.0,
        ) {
            let container = screen();
            let mut object = Rect::new(100.0, 100.0, 140.0, 140.0);
            match edge {
                0 => object.origin.x = container.left() - overshoot,
                1 => object.origin.x = container.right() - object.size.x + overshoot,
                2 => object.origin.y = container.top() - overshoot,
                _ => object.origin.y = container.bottom() - object.size.y + overshoot,
            }
            prop_assert!(is_out_of_bounds(&object, &container));
        }
    }
}
