//! Axis-aligned boxes
//!
//! All collision in the game is box-vs-box in screen space (y grows down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(side),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same box shifted by `delta`
    #[inline]
    pub fn offset(&self, delta: Vec2) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Region covered while moving `dx` along X (start and end boxes joined)
    pub fn swept_x(&self, dx: f32) -> Self {
        Self {
            pos: Vec2::new(self.pos.x + dx.min(0.0), self.pos.y),
            size: Vec2::new(self.size.x + dx.abs(), self.size.y),
        }
    }

    /// Region covered while moving `dy` along Y
    pub fn swept_y(&self, dy: f32) -> Self {
        Self {
            pos: Vec2::new(self.pos.x, self.pos.y + dy.min(0.0)),
            size: Vec2::new(self.size.x, self.size.y + dy.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn test_swept_covers_both_ends() {
        let r = Rect::new(10.0, 20.0, 5.0, 5.0);
        let left = r.swept_x(-30.0);
        assert_eq!(left.left(), -20.0);
        assert_eq!(left.right(), 15.0);

        let down = r.swept_y(12.0);
        assert_eq!(down.top(), 20.0);
        assert_eq!(down.bottom(), 37.0);
    }
}
