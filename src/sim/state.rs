//! Game session state and core simulation types
//!
//! Everything a frame reads or writes lives in one owned `GameSession`.

use super::ball::{AxisOutcome, Ball, FrameOutcome};
use super::paddle::Paddle;
use super::wall::{self, BrickWall};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start key press
    Ready,
    /// Simulation advancing every frame
    Running,
    /// Paused mid-game, same key resumes
    Paused,
    /// Out of lives, waiting for the key to quit
    LivesDepleted,
    /// Whole wall cleared, waiting for the key to quit
    AllBricksCleared,
    /// Session over, frame loop exits
    Quit,
}

impl GamePhase {
    /// Game over states that only accept a confirm-to-quit key
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::LivesDepleted | GamePhase::AllBricksCleared)
    }

    /// Status line shown in the middle of the screen, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GamePhase::Ready | GamePhase::Paused | GamePhase::Running => {
                Some("Hit UP to start/pause/resume/quit")
            }
            GamePhase::LivesDepleted => Some("Game Over!, press UP key to quit"),
            GamePhase::AllBricksCleared => Some("Congratulations!,hit UP to quit"),
            GamePhase::Quit => None,
        }
    }
}

/// Side effects requested by a frame, drained by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PaddleBounce,
    WallBounce,
    BrickBroken { row: usize, col: usize, points: u32 },
    LifeLost { lives_left: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub wall: BrickWall,
    /// Score at which the wall is fully cleared
    pub win_score: u32,
    /// Frames simulated while running
    pub frames: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            phase: GamePhase::Ready,
            paddle: Paddle::new(),
            ball: Ball::new(),
            wall: BrickWall::new(),
            win_score: wall::max_score(),
            frames: 0,
            events: Vec::new(),
        }
    }

    pub fn bricks_remaining(&self) -> usize {
        self.wall.remaining()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Quit
    }

    /// Move to `to`, recording the transition. No-op if already there.
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Fold a ball step into score, lives and the event queue
    pub fn apply_outcome(&mut self, outcome: &FrameOutcome) {
        for axis in outcome.axes() {
            match axis {
                AxisOutcome::None => {}
                AxisOutcome::WallBounce => self.events.push(GameEvent::WallBounce),
                AxisOutcome::PaddleBounce => self.events.push(GameEvent::PaddleBounce),
                AxisOutcome::BrickBroken { row, col } => {
                    let points = wall::points_for_row(row);
                    self.score += points;
                    log::debug!(
                        "Brick ({}, {}) broken for {} points, {} left",
                        row,
                        col,
                        points,
                        self.wall.remaining()
                    );
                    self.events.push(GameEvent::BrickBroken { row, col, points });
                }
                AxisOutcome::ExitedBottom => {
                    self.lives = self.lives.saturating_sub(1);
                    log::debug!("Ball lost, {} lives left", self.lives);
                    self.events.push(GameEvent::LifeLost {
                        lives_left: self.lives,
                    });
                }
            }
        }
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let session = GameSession::new();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 3);
        assert_eq!(session.phase, GamePhase::Ready);
        assert_eq!(session.bricks_remaining(), 50);
        assert_eq!(session.win_score, 150);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_set_phase_records_transition_once() {
        let mut session = GameSession::new();
        session.set_phase(GamePhase::Running);
        session.set_phase(GamePhase::Running);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::Running
            }]
        );
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_apply_outcome_scores_by_row() {
        let mut session = GameSession::new();
        session.wall.destroy(0, 4);
        session.wall.destroy(3, 2);
        session.apply_outcome(&FrameOutcome {
            x: AxisOutcome::BrickBroken { row: 0, col: 4 },
            y: AxisOutcome::BrickBroken { row: 3, col: 2 },
        });
        assert_eq!(session.score, 5 + 2);
        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::BrickBroken { row: 0, col: 4, points: 5 },
                GameEvent::BrickBroken { row: 3, col: 2, points: 2 },
            ]
        );
    }

    #[test]
    fn test_apply_outcome_life_lost() {
        let mut session = GameSession::new();
        session.apply_outcome(&FrameOutcome {
            x: AxisOutcome::WallBounce,
            y: AxisOutcome::ExitedBottom,
        });
        assert_eq!(session.lives, 2);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::WallBounce, GameEvent::LifeLost { lives_left: 2 }]
        );
    }

    #[test]
    fn test_phase_messages() {
        assert_eq!(
            GamePhase::Ready.message(),
            Some("Hit UP to start/pause/resume/quit")
        );
        assert_eq!(
            GamePhase::LivesDepleted.message(),
            Some("Game Over!, press UP key to quit")
        );
        assert_eq!(
            GamePhase::AllBricksCleared.message(),
            Some("Congratulations!,hit UP to quit")
        );
        assert!(GamePhase::AllBricksCleared.is_finished());
        assert!(!GamePhase::Paused.is_finished());
    }
}
