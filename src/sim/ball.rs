//! The ball and its per-axis bounce resolution
//!
//! Each frame the ball moves horizontally first, then vertically. On each
//! axis a move that leaves the playfield or lands inside the paddle or an
//! active brick is undone and that velocity component is negated. The axis
//! order decides which one reflects on a corner hit.

use super::rect::{Rect, overlaps};
use super::wall::BrickWall;
use crate::consts::*;

/// What happened on one axis during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisOutcome {
    #[default]
    None,
    /// Reflected off a screen edge
    WallBounce,
    /// Reflected off the paddle
    PaddleBounce,
    /// Reflected off and destroyed this brick
    BrickBroken { row: usize, col: usize },
    /// Fell past the bottom edge and was recentered (vertical axis only)
    ExitedBottom,
}

/// Result of one `Ball::step`. Both axes can report something in the same
/// frame (diagonal bounce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    pub x: AxisOutcome,
    pub y: AxisOutcome,
}

impl FrameOutcome {
    pub fn is_none(&self) -> bool {
        self.x == AxisOutcome::None && self.y == AxisOutcome::None
    }

    pub fn exited_bottom(&self) -> bool {
        self.y == AxisOutcome::ExitedBottom
    }

    /// Outcomes in resolution order (horizontal first)
    pub fn axes(&self) -> [AxisOutcome; 2] {
        [self.x, self.y]
    }
}

/// Something solid the ball ran into
enum Hit {
    Paddle,
    Brick(usize, usize),
}

/// The ball
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
    /// Collision box, kept in sync with `x`/`y`
    pub collider: Rect,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// Screen-center spawn point
    pub const START: (i32, i32) = (
        (SCREEN_WIDTH - BALL_WIDTH) / 2,
        (SCREEN_HEIGHT - BALL_HEIGHT) / 2,
    );

    pub fn new() -> Self {
        let (x, y) = Self::START;
        Self {
            x,
            y,
            vx: BALL_SPEED,
            vy: BALL_SPEED,
            collider: Rect::new(x, y, BALL_WIDTH, BALL_HEIGHT),
        }
    }

    /// Put the ball back at screen center. Velocity is kept.
    pub fn recenter(&mut self) {
        (self.x, self.y) = Self::START;
        self.sync_collider();
    }

    fn sync_collider(&mut self) {
        self.collider.x = self.x;
        self.collider.y = self.y;
    }

    /// Paddle first, then the first active brick in row-major order
    fn find_hit(&self, paddle: Rect, wall: &BrickWall) -> Option<Hit> {
        if overlaps(self.collider, paddle) {
            return Some(Hit::Paddle);
        }
        wall.first_overlap(self.collider)
            .map(|(row, col)| Hit::Brick(row, col))
    }

    /// Resolve a hit: break the brick if it was one, report what happened
    fn resolve_hit(hit: Hit, wall: &mut BrickWall) -> AxisOutcome {
        match hit {
            Hit::Paddle => AxisOutcome::PaddleBounce,
            Hit::Brick(row, col) => {
                wall.destroy(row, col);
                AxisOutcome::BrickBroken { row, col }
            }
        }
    }

    /// Advance one frame against the paddle and the wall. Bricks hit are
    /// destroyed here; scoring and lives are the caller's concern.
    pub fn step(&mut self, paddle: Rect, wall: &mut BrickWall) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        // Horizontal
        self.x += self.vx;
        self.sync_collider();
        let x_result = if self.x < 0 || self.x + BALL_WIDTH > SCREEN_WIDTH {
            AxisOutcome::WallBounce
        } else {
            self.find_hit(paddle, wall)
                .map_or(AxisOutcome::None, |hit| Self::resolve_hit(hit, wall))
        };
        if x_result != AxisOutcome::None {
            self.x -= self.vx;
            self.sync_collider();
            self.vx = -self.vx;
        }
        outcome.x = x_result;

        // Vertical
        self.y += self.vy;
        self.sync_collider();
        if self.y + BALL_HEIGHT > SCREEN_HEIGHT {
            self.recenter();
            outcome.y = AxisOutcome::ExitedBottom;
            return outcome;
        }
        let y_result = if self.y < 0 {
            AxisOutcome::WallBounce
        } else {
            self.find_hit(paddle, wall)
                .map_or(AxisOutcome::None, |hit| Self::resolve_hit(hit, wall))
        };
        if y_result != AxisOutcome::None {
            self.y -= self.vy;
            self.sync_collider();
            self.vy = -self.vy;
        }
        outcome.y = y_result;

        outcome
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_ball_stays_in_bounds(
            frames in 1usize..2000,
            paddle_x in 0i32..=(SCREEN_WIDTH - PADDLE_WIDTH),
            flip_x in any::<bool>(),
        ) {
            let mut wall = BrickWall::new();
            let paddle = Rect::new(paddle_x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT);
            let mut ball = Ball::new();
            if flip_x {
                ball.vx = -ball.vx;
            }
            for _ in 0..frames {
                let before = wall.remaining();
                let outcome = ball.step(paddle, &mut wall);
                prop_assert!(ball.x >= 0 && ball.x <= SCREEN_WIDTH - BALL_WIDTH);
                prop_assert!(ball.y >= 0 && ball.y < SCREEN_HEIGHT - BALL_HEIGHT + 1);
                prop_assert!(before - wall.remaining() <= 2);
                if outcome.exited_bottom() {
                    prop_assert_eq!((ball.x, ball.y), Ball::START);
                }
            }
        }
    }
}
