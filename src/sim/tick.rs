//! Per-frame simulation tick
//!
//! Core game loop step: apply the frame's input to the phase machine and the
//! paddle, then advance paddle and ball if the game is running.

use super::state::{GamePhase, GameSession};

/// Keys the game cares about. `Up` is the start/pause/resume/quit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Other,
}

/// A key transition within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down { key: Key, repeat: bool },
    Up { key: Key },
}

/// Input commands for a single frame, in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Window closed / interrupt
    pub quit: bool,
    pub keys: Vec<KeyAction>,
}

impl TickInput {
    pub fn press(key: Key) -> Self {
        Self {
            quit: false,
            keys: vec![KeyAction::Down { key, repeat: false }],
        }
    }

    pub fn quit() -> Self {
        Self {
            quit: true,
            keys: Vec::new(),
        }
    }
}

/// Phase reached by pressing the control key in `phase`
fn control_key_target(phase: GamePhase) -> GamePhase {
    match phase {
        GamePhase::Ready | GamePhase::Paused => GamePhase::Running,
        GamePhase::Running => GamePhase::Paused,
        GamePhase::LivesDepleted | GamePhase::AllBricksCleared | GamePhase::Quit => GamePhase::Quit,
    }
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    if session.is_over() {
        return;
    }
    if input.quit {
        session.set_phase(GamePhase::Quit);
        return;
    }

    for action in &input.keys {
        match *action {
            KeyAction::Down { key: Key::Up, repeat } => {
                if !repeat {
                    session.set_phase(control_key_target(session.phase));
                }
            }
            KeyAction::Down { key, repeat } => {
                // Steering is recorded while paused, ignored once the game is over
                if !session.phase.is_finished() {
                    session.paddle.handle_key_down(key, repeat);
                }
            }
            KeyAction::Up { key } => {
                if !session.phase.is_finished() {
                    session.paddle.handle_key_up(key);
                }
            }
        }
        if session.is_over() {
            return;
        }
    }

    if session.phase != GamePhase::Running {
        return;
    }

    session.frames += 1;
    session.paddle.step();
    let outcome = session.ball.step(session.paddle.collider, &mut session.wall);
    session.apply_outcome(&outcome);

    if session.lives == 0 {
        session.set_phase(GamePhase::LivesDepleted);
    } else if session.score >= session.win_score || session.wall.remaining() == 0 {
        session.set_phase(GamePhase::AllBricksCleared);
    }
}
