//! Axis-aligned rectangles and the overlap test
//!
//! Every collider in the game (bricks, paddle, ball) is a `Rect` in pixel
//! space with the origin at the top-left of the screen and y growing down.

/// Axis-aligned box: top-left corner plus width/height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True if the box has no area (destroyed bricks collapse to this)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Strict-interior overlap test. Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.bottom() <= b.top()
        || a.top() >= b.bottom()
        || a.right() <= b.left()
        || a.left() >= b.right())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0, 0, 20, 20);
        let b = Rect::new(10, 10, 20, 20);
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 5, 5);
        assert!(overlaps(outer, inner));
        assert!(overlaps(inner, outer));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 20, 20);
        // Right edge of a == left edge of b
        assert!(!overlaps(a, Rect::new(20, 0, 20, 20)));
        // Bottom edge of a == top edge of b
        assert!(!overlaps(a, Rect::new(0, 20, 20, 20)));
        // Corner contact only
        assert!(!overlaps(a, Rect::new(20, 20, 5, 5)));
    }

    #[test]
    fn test_zero_area_box_is_empty() {
        assert!(Rect::new(10, 10, 0, 0).is_empty());
        assert!(Rect::new(10, 10, 5, 0).is_empty());
        assert!(!Rect::new(10, 10, 5, 5).is_empty());
    }
}
