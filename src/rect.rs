//! Integer rectangle used for damage areas and region bounds.
//!
//! Coordinates are widget-relative pixels. A rectangle with zero width or
//! height is empty and never overlaps anything.

use serde::{Deserialize, Serialize};

/// A pixel rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Right edge, exclusive.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge, exclusive.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// The same rectangle shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_and_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.overlaps(&b));
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));

        let c = Rect::new(10, 0, 5, 5);
        assert!(!a.overlaps(&c));
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_empty_never_overlaps() {
        let a = Rect::new(0, 0, 10, 10);
        let empty = Rect::new(2, 2, 0, 5);
        assert!(empty.is_empty());
        assert!(!a.overlaps(&empty));
    }

    #[test]
    fn test_translate() {
        let a = Rect::new(3, 4, 5, 6);
        assert_eq!(a.translated(-3, 1), Rect::new(0, 5, 5, 6));
    }
}
