//! Breakout - a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, paddle/ball motion, game phases)
//! - `renderer`: Render snapshots and the WebGPU rectangle pipeline
//! - `platform`: Input vocabulary, frontend abstraction and the frame loop
//! - `settings`: Player preferences loaded at startup
//! - `terminal`: crossterm frontend (native)
//! - `audio`: WebAudio sound effects (web)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 400;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Brick wall layout
    pub const ROWS: usize = 5;
    pub const COLS: usize = 10;
    pub const BRICK_WIDTH: i32 = SCREEN_WIDTH / 11;
    pub const BRICK_HEIGHT: i32 = 10;
    pub const WALL_MARGIN: i32 = 2;
    pub const WALL_TOP: i32 = 40;
    pub const COL_STRIDE: i32 = 40;
    pub const ROW_STRIDE: i32 = 20;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 60;
    pub const PADDLE_HEIGHT: i32 = 10;
    pub const PADDLE_Y: i32 = 580;
    /// Horizontal speed in pixels per frame
    pub const PADDLE_VEL: i32 = 10;

    /// Ball defaults
    pub const BALL_WIDTH: i32 = 20;
    pub const BALL_HEIGHT: i32 = 20;
    /// Per-axis speed in pixels per frame
    pub const BALL_SPEED: i32 = 3;

    pub const STARTING_LIVES: u32 = 3;

    /// HUD label positions
    pub const SCORE_LABEL_POS: (i32, i32) = (5, 5);
    pub const LIVES_LABEL_POS: (i32, i32) = (320, 5);
    pub const MESSAGE_POS: (i32, i32) = (5, SCREEN_HEIGHT / 2 + 20);
}
