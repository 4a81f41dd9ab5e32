//! Render snapshot
//!
//! A `Scene` is everything needed to draw one frame, built from a read-only
//! view of the session. Presentation backends only ever see this.

use crate::consts::*;
use crate::sim::rect::Rect;
use crate::sim::{GamePhase, GameSession};

/// 8-bit RGBA color
pub type Rgba = [u8; 4];

pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [255, 255, 255, 255];
    pub const PADDLE: Rgba = [0, 0, 0, 255];
    pub const BALL: Rgba = [64, 64, 64, 255];
    pub const TEXT: Rgba = [0, 0, 0, 255];
}

/// Filled axis-aligned rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledRect {
    pub rect: Rect,
    pub color: Rgba,
}

/// Which HUD slot a label fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Score,
    Lives,
    Message,
}

/// A line of text anchored at its top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub kind: LabelKind,
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Rgba,
}

/// One frame's draw list, back to front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub clear: Rgba,
    pub rects: Vec<FilledRect>,
    pub labels: Vec<TextLabel>,
}

impl Scene {
    pub fn from_session(session: &GameSession) -> Self {
        let mut scene = Scene {
            clear: colors::BACKGROUND,
            rects: Vec::new(),
            labels: Vec::new(),
        };

        // Game over screens show the status line only
        if !session.phase.is_finished() && session.phase != GamePhase::Quit {
            for brick in session.wall.active_bricks() {
                let [r, g, b] = brick.color;
                scene.rects.push(FilledRect {
                    rect: brick.rect,
                    color: [r, g, b, 255],
                });
            }
            scene.rects.push(FilledRect {
                rect: session.paddle.collider,
                color: colors::PADDLE,
            });
            scene.rects.push(FilledRect {
                rect: session.ball.collider,
                color: colors::BALL,
            });

            scene.push_label(
                LabelKind::Score,
                SCORE_LABEL_POS,
                format!("Score:{}", session.score),
            );
            scene.push_label(
                LabelKind::Lives,
                LIVES_LABEL_POS,
                format!("Lives:{}", session.lives),
            );
        }

        if let Some(message) = session.phase.message() {
            scene.push_label(LabelKind::Message, MESSAGE_POS, message.to_string());
        }

        scene
    }

    fn push_label(&mut self, kind: LabelKind, (x, y): (i32, i32), text: String) {
        self.labels.push(TextLabel {
            kind,
            x,
            y,
            text,
            color: colors::TEXT,
        });
    }

    pub fn label(&self, kind: LabelKind) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_scene() {
        let session = GameSession::new();
        let scene = Scene::from_session(&session);

        // 50 bricks + paddle + ball
        assert_eq!(scene.rects.len(), 52);
        assert_eq!(scene.rects[0].color, [255, 0, 0, 255]);
        assert_eq!(scene.rects[50].rect, session.paddle.collider);
        assert_eq!(scene.rects[51].rect, session.ball.collider);

        assert_eq!(scene.label(LabelKind::Score), Some("Score:0"));
        assert_eq!(scene.label(LabelKind::Lives), Some("Lives:3"));
        assert_eq!(
            scene.label(LabelKind::Message),
            Some("Hit UP to start/pause/resume/quit")
        );
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut session = GameSession::new();
        session.wall.destroy(0, 0);
        session.wall.destroy(4, 9);
        let scene = Scene::from_session(&session);
        assert_eq!(scene.rects.len(), 50);
    }

    #[test]
    fn test_game_over_shows_message_only() {
        let mut session = GameSession::new();
        session.phase = GamePhase::LivesDepleted;
        let scene = Scene::from_session(&session);
        assert!(scene.rects.is_empty());
        assert_eq!(scene.labels.len(), 1);
        assert_eq!(
            scene.label(LabelKind::Message),
            Some("Game Over!, press UP key to quit")
        );
    }
}
