//! The player's paddle

use super::rect::Rect;
use super::tick::Key;
use crate::consts::*;

/// Horizontal paddle driven by the arrow keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paddle {
    pub x: i32,
    pub y: i32,
    /// One of `-PADDLE_VEL`, `0`, `PADDLE_VEL`
    pub vel: i32,
    /// Collision box, kept in sync with `x`/`y`
    pub collider: Rect,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

impl Paddle {
    pub fn new() -> Self {
        let x = (SCREEN_WIDTH - PADDLE_WIDTH) / 2;
        Self {
            x,
            y: PADDLE_Y,
            vel: 0,
            collider: Rect::new(x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Set velocity from an arrow key press. Repeats and other keys are ignored.
    pub fn handle_key_down(&mut self, key: Key, repeat: bool) {
        if repeat {
            return;
        }
        match key {
            Key::Left => self.vel = -PADDLE_VEL,
            Key::Right => self.vel = PADDLE_VEL,
            _ => {}
        }
    }

    /// Stop if the released key is the one currently driving the paddle
    pub fn handle_key_up(&mut self, key: Key) {
        match key {
            Key::Left if self.vel < 0 => self.vel = 0,
            Key::Right if self.vel > 0 => self.vel = 0,
            _ => {}
        }
    }

    /// Advance one frame. A move that would leave the screen is undone;
    /// velocity is left alone so the paddle simply rests against the edge.
    pub fn step(&mut self) {
        self.x += self.vel;
        if self.x < 0 || self.x + PADDLE_WIDTH > SCREEN_WIDTH {
            self.x -= self.vel;
        }
        self.sync_collider();
    }

    fn sync_collider(&mut self) {
        self.collider.x = self.x;
        self.collider.y = self.y;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_paddle_stays_on_screen(
            moves in prop::collection::vec((0u8..3, 0usize..40), 1..30)
        ) {
            let mut paddle = Paddle::new();
            for (key, frames) in moves {
                let key = match key {
                    0 => Key::Left,
                    1 => Key::Right,
                    _ => Key::Other,
                };
                paddle.handle_key_down(key, false);
                for _ in 0..frames {
                    paddle.step();
                    prop_assert!(paddle.x >= 0);
                    prop_assert!(paddle.x <= SCREEN_WIDTH - PADDLE_WIDTH);
                    prop_assert_eq!(paddle.collider.x, paddle.x);
                }
            }
        }
    }
}
