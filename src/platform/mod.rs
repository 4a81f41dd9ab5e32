//! Platform abstraction layer
//!
//! Handles the boundary between the simulation and whatever hosts it:
//! - Input events and how a frame's worth of them becomes a `TickInput`
//! - The `Frontend` trait (poll input, play sounds, present a scene)
//! - The frame loop that drives a session through a frontend
//! - Startup errors

pub mod frame_loop;
pub mod input;

pub use crate::sim::tick::Key;
pub use frame_loop::FrameLoop;
pub use input::{InputDispatch, InputEvent};

use std::fmt;
use std::io;

use crate::renderer::Scene;
use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleBounce,
    /// Ball breaks a brick
    BrickBreak,
}

impl SoundEffect {
    /// Sound requested by a simulation event, if any. Wall bounces and
    /// lost balls are silent.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleBounce => Some(SoundEffect::PaddleBounce),
            GameEvent::BrickBroken { .. } => Some(SoundEffect::BrickBreak),
            _ => None,
        }
    }
}

/// Trait that abstracts the presentation backend.
/// The frame loop only ever talks to the outside world through this.
pub trait Frontend {
    /// Input events that arrived since the last call, oldest first
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Fire-and-forget sound effect
    fn play(&mut self, effect: SoundEffect);

    /// Draw a finished frame
    fn present(&mut self, scene: &Scene) -> io::Result<()>;
}

/// A subsystem failed to come up; the session never starts
#[derive(Debug)]
pub enum InitError {
    Terminal(io::Error),
    Renderer(String),
    Audio(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Terminal(e) => write!(f, "terminal could not be initialized: {}", e),
            InitError::Renderer(e) => write!(f, "renderer could not be created: {}", e),
            InitError::Audio(e) => write!(f, "audio could not be initialized: {}", e),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::Terminal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for InitError {
    fn from(e: io::Error) -> Self {
        InitError::Terminal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_sound_for_event() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleBounce),
            Some(SoundEffect::PaddleBounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickBroken { row: 1, col: 2, points: 4 }),
            Some(SoundEffect::BrickBreak)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::WallBounce), None);
        assert_eq!(SoundEffect::for_event(&GameEvent::LifeLost { lives_left: 1 }), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::Running
            }),
            None
        );
    }

    #[test]
    fn test_init_error_names_subsystem() {
        let err = InitError::Renderer("no adapter".to_string());
        assert_eq!(err.to_string(), "renderer could not be created: no adapter");

        let err = InitError::from(io::Error::other("not a tty"));
        assert!(err.to_string().starts_with("terminal"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
