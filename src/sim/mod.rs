//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, integer pixel motion
//! - Stable iteration order (row-major brick scans)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod paddle;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wall;

pub use ball::{AxisOutcome, Ball, FrameOutcome};
pub use paddle::Paddle;
pub use rect::{Rect, overlaps};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{TickInput, tick};
pub use wall::{Brick, BrickWall, Rgb};
