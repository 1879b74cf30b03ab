//! Axis-aligned rectangle and circle overlap primitives

use glam::Vec2;

/// Axis-aligned rectangle, origin at top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True if the two rectangles overlap (edge contact does not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// True if `center` is strictly within `reach` of `point`.
///
/// Strict inequality: contact exactly at the boundary does not count.
pub fn within_reach(center: Vec2, point: Vec2, reach: f32) -> bool {
    center.distance(point) < reach
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_within_reach_strict_boundary() {
        let center = Vec2::new(0.0, 0.0);
        // Exactly at the boundary: not a hit
        assert!(!within_reach(center, Vec2::new(25.0, 0.0), 25.0));
        // Just inside
        assert!(within_reach(center, Vec2::new(24.9, 0.0), 25.0));
    }
}
