//! The frame loop: input, then simulation, then sound and render, once per frame
//!
//! Frame rate is whatever the frontend delivers; `poll_events` is where a
//! frontend waits for its next frame (terminal pacing, vsync on the web).

use std::io;

use super::{Frontend, InputDispatch, SoundEffect};
use crate::renderer::Scene;
use crate::sim::{GameSession, tick};

pub struct FrameLoop<F: Frontend> {
    session: GameSession,
    dispatch: InputDispatch,
    frontend: F,
}

impl<F: Frontend> FrameLoop<F> {
    pub fn new(session: GameSession, dispatch: InputDispatch, frontend: F) -> Self {
        Self {
            session,
            dispatch,
            frontend,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Draw the current state without advancing anything
    pub fn present(&mut self) -> io::Result<()> {
        self.frontend.present(&Scene::from_session(&self.session))
    }

    /// Run one frame. Returns `false` once the session has quit.
    pub fn run_frame(&mut self) -> io::Result<bool> {
        let events = self.frontend.poll_events()?;
        let input = self.dispatch.collect(events);
        tick(&mut self.session, &input);

        for event in self.session.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.frontend.play(effect);
            }
        }

        if self.session.is_over() {
            return Ok(false);
        }
        self.present()?;
        Ok(true)
    }

    /// Run until the session quits
    pub fn run(&mut self) -> io::Result<()> {
        self.present()?;
        while self.run_frame()? {}
        log::info!(
            "Session ended: score {}, lives {}, {} bricks left, {} frames",
            self.session.score,
            self.session.lives,
            self.session.bricks_remaining(),
            self.session.frames
        );
        Ok(())
    }
}
