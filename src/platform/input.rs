//! Raw input events and per-frame dispatch

use crate::settings::Settings;
use crate::sim::tick::{Key, KeyAction, TickInput};

/// Discrete input event as reported by a frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or interrupt requested
    Quit,
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
}

/// Folds a frame's raw events into the simulation's `TickInput`
#[derive(Debug, Clone, Default)]
pub struct InputDispatch {
    /// Forward key releases so the paddle stops when its key is let go
    stop_on_release: bool,
}

impl InputDispatch {
    pub fn new(settings: &Settings) -> Self {
        Self {
            stop_on_release: settings.paddle_stops_on_release,
        }
    }

    pub fn collect<I>(&self, events: I) -> TickInput
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut input = TickInput::default();
        for event in events {
            match event {
                InputEvent::Quit => input.quit = true,
                InputEvent::KeyDown { key: Key::Other, .. } => {}
                InputEvent::KeyDown { key, repeat } => {
                    input.keys.push(KeyAction::Down { key, repeat })
                }
                InputEvent::KeyUp { key } => {
                    if self.stop_on_release && matches!(key, Key::Left | Key::Right) {
                        input.keys.push(KeyAction::Up { key });
                    }
                }
            }
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_keeps_order_and_drops_noise() {
        let dispatch = InputDispatch::default();
        let input = dispatch.collect([
            InputEvent::KeyDown { key: Key::Up, repeat: false },
            InputEvent::KeyDown { key: Key::Other, repeat: false },
            InputEvent::KeyDown { key: Key::Left, repeat: true },
            InputEvent::KeyUp { key: Key::Left },
        ]);
        assert!(!input.quit);
        assert_eq!(
            input.keys,
            vec![
                KeyAction::Down { key: Key::Up, repeat: false },
                KeyAction::Down { key: Key::Left, repeat: true },
            ]
        );
    }

    #[test]
    fn test_releases_forwarded_when_enabled() {
        let settings = Settings {
            paddle_stops_on_release: true,
            ..Settings::default()
        };
        let dispatch = InputDispatch::new(&settings);
        let input = dispatch.collect([
            InputEvent::KeyUp { key: Key::Right },
            InputEvent::KeyUp { key: Key::Up },
        ]);
        assert_eq!(input.keys, vec![KeyAction::Up { key: Key::Right }]);
    }

    #[test]
    fn test_quit_flag() {
        let input = InputDispatch::default().collect([InputEvent::Quit]);
        assert!(input.quit);
    }
}
