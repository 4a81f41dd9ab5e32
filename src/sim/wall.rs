//! The destructible brick wall
//!
//! A fixed `ROWS x COLS` grid laid out once per session. Bricks are only ever
//! destroyed, never restored, and keep their `(row, col)` identity for life.

use super::rect::{Rect, overlaps};
use crate::consts::*;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Row colors, top to bottom. Cycles if the wall has more rows than entries.
pub const PALETTE: [Rgb; 5] = [
    [255, 0, 0],   // red
    [255, 144, 0], // orange
    [0, 128, 0],   // green
    [255, 255, 0], // yellow
    [0, 0, 255],   // blue
];

/// Points awarded for breaking a brick in `row` (top row is worth the most)
#[inline]
pub fn points_for_row(row: usize) -> u32 {
    (ROWS - row) as u32
}

/// Score reached when every brick has been broken
pub fn max_score() -> u32 {
    (0..ROWS).map(points_for_row).sum::<u32>() * COLS as u32
}

/// A single brick. A zero-area collider means the brick is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub color: Rgb,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.rect.is_empty()
    }
}

/// Grid of bricks stored row-major, plus the live count
#[derive(Debug, Clone)]
pub struct BrickWall {
    bricks: Vec<Brick>,
    remaining: usize,
}

impl Default for BrickWall {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickWall {
    /// Lay out a fresh, fully intact wall
    pub fn new() -> Self {
        let mut bricks = Vec::with_capacity(ROWS * COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                bricks.push(Brick {
                    row,
                    col,
                    rect: Rect::new(
                        WALL_MARGIN + col as i32 * COL_STRIDE,
                        WALL_TOP + row as i32 * ROW_STRIDE,
                        BRICK_WIDTH,
                        BRICK_HEIGHT,
                    ),
                    color: PALETTE[row % PALETTE.len()],
                });
            }
        }
        Self {
            bricks,
            remaining: ROWS * COLS,
        }
    }

    #[inline]
    fn index(row: usize, col: usize) -> Option<usize> {
        (row < ROWS && col < COLS).then_some(row * COLS + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        Self::index(row, col).map(|i| &self.bricks[i])
    }

    /// True iff the brick exists and still has area
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Brick::is_active)
    }

    /// Collapse a brick to zero area. Returns `false` (and changes nothing)
    /// if the brick was already destroyed or out of range.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        let Some(i) = Self::index(row, col) else {
            return false;
        };
        let brick = &mut self.bricks[i];
        if !brick.is_active() {
            return false;
        }
        brick.rect.w = 0;
        brick.rect.h = 0;
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// All bricks in row-major order, destroyed ones included
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.is_active())
    }

    /// First active brick overlapping `collider`, scanning top-to-bottom,
    /// left-to-right. Later overlaps are ignored.
    pub fn first_overlap(&self, collider: Rect) -> Option<(usize, usize)> {
        self.active_bricks()
            .find(|b| overlaps(collider, b.rect))
            .map(|b| (b.row, b.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let wall = BrickWall::new();
        assert_eq!(wall.remaining(), 50);
        assert_eq!(wall.bricks().len(), ROWS * COLS);

        let first = wall.get(0, 0).unwrap();
        assert_eq!(first.rect, Rect::new(2, 40, 36, 10));
        assert_eq!(first.color, [255, 0, 0]);

        let last = wall.get(4, 9).unwrap();
        assert_eq!(last.rect, Rect::new(2 + 9 * 40, 40 + 4 * 20, 36, 10));
        assert_eq!(last.color, [0, 0, 255]);

        assert!(wall.bricks().iter().all(Brick::is_active));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut wall = BrickWall::new();
        assert!(wall.destroy(2, 3));
        assert_eq!(wall.remaining(), 49);
        assert!(!wall.is_active(2, 3));

        assert!(!wall.destroy(2, 3));
        assert_eq!(wall.remaining(), 49);
    }

    #[test]
    fn test_out_of_range_brick() {
        let mut wall = BrickWall::new();
        assert!(!wall.is_active(ROWS, 0));
        assert!(!wall.destroy(0, COLS));
        assert_eq!(wall.remaining(), 50);
    }

    #[test]
    fn test_row_points_and_max_score() {
        assert_eq!(points_for_row(0), 5);
        assert_eq!(points_for_row(4), 1);
        assert_eq!(max_score(), 150);
    }

    #[test]
    fn test_first_overlap_is_row_major() {
        let mut wall = BrickWall::new();
        // Spans bricks (0,0), (0,1), (1,0), (1,1)
        let ball = Rect::new(30, 45, 20, 20);
        assert_eq!(wall.first_overlap(ball), Some((0, 0)));

        wall.destroy(0, 0);
        assert_eq!(wall.first_overlap(ball), Some((0, 1)));

        wall.destroy(0, 1);
        assert_eq!(wall.first_overlap(ball), Some((1, 0)));
    }

    #[test]
    fn test_gap_between_bricks_is_clear() {
        let wall = BrickWall::new();
        // Column gap between x=38 and x=42
        assert_eq!(wall.first_overlap(Rect::new(38, 40, 4, 10)), None);
        // Row gap between y=50 and y=60
        assert_eq!(wall.first_overlap(Rect::new(2, 50, 36, 10)), None);
    }

    #[test]
    fn test_first_overlap_skips_destroyed_brick() {
        let mut wall = BrickWall::new();
        // Sits inside brick (2, 4) only
        let ball = Rect::new(2 + 4 * 40 + 8, 82, 20, 6);
        assert_eq!(wall.first_overlap(ball), Some((2, 4)));

        wall.destroy(2, 4);
        let destroyed = wall.get(2, 4).map(|b| b.rect).unwrap();
        assert!(destroyed.is_empty());
        assert_eq!(wall.first_overlap(ball), None);
    }
}
