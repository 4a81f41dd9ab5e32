//! Terminal frontend (native builds)
//!
//! Rasterizes scenes onto a grid of colored character cells with crossterm.
//! Each cell stands for `cell_width x cell_height` playfield pixels.

use std::io::{self, Stdout, Write};
use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::platform::{Frontend, InitError, InputEvent, Key, SoundEffect};
use crate::renderer::{Rgba, Scene};
use crate::settings::Settings;

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Rgba,
}

/// A scene flattened to character cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    pub cols: usize,
    pub rows: usize,
    cells: Vec<Cell>,
}

/// Cells along one axis covered by `[start, start + len)`: every cell whose
/// center falls inside, or the cell under the midpoint for thin spans.
fn span(start: i32, len: i32, cell: i32, limit: usize) -> Range<usize> {
    if len <= 0 {
        return 0..0;
    }
    let first = (start - cell / 2).div_euclid(cell) + 1;
    let first = if (first - 1) * cell + cell / 2 >= start {
        first - 1
    } else {
        first
    };
    let last = (start + len - 1 - cell / 2).div_euclid(cell);
    let (lo, hi) = if last >= first {
        (first, last + 1)
    } else {
        let mid = (start + len / 2).div_euclid(cell);
        (mid, mid + 1)
    };
    let clamp = |v: i32| v.clamp(0, limit as i32) as usize;
    clamp(lo)..clamp(hi)
}

impl CellGrid {
    pub fn new(cols: usize, rows: usize, bg: Rgba) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell { ch: ' ', fg: bg, bg }; cols * rows],
        }
    }

    /// Grid size needed to show the whole playfield
    pub fn dimensions(cell_width: u32, cell_height: u32) -> (usize, usize) {
        let cw = cell_width.max(1) as i32;
        let ch = cell_height.max(1) as i32;
        (
            ((SCREEN_WIDTH + cw - 1) / cw) as usize,
            ((SCREEN_HEIGHT + ch - 1) / ch) as usize,
        )
    }

    pub fn rasterize(scene: &Scene, cell_width: u32, cell_height: u32) -> Self {
        let (cols, rows) = Self::dimensions(cell_width, cell_height);
        let cw = cell_width.max(1) as i32;
        let ch = cell_height.max(1) as i32;
        let mut grid = Self::new(cols, rows, scene.clear);

        for fill in &scene.rects {
            let xs = span(fill.rect.x, fill.rect.w, cw, cols);
            for row in span(fill.rect.y, fill.rect.h, ch, rows) {
                for col in xs.clone() {
                    let cell = &mut grid.cells[row * cols + col];
                    cell.bg = fill.color;
                    cell.fg = fill.color;
                    cell.ch = ' ';
                }
            }
        }

        for label in &scene.labels {
            let row = label.y.div_euclid(ch);
            if row < 0 || row as usize >= rows {
                continue;
            }
            let start = label.x.div_euclid(cw).max(0) as usize;
            for (i, c) in label.text.chars().enumerate() {
                let col = start + i;
                if col >= cols {
                    break;
                }
                let cell = &mut grid.cells[row as usize * cols + col];
                cell.ch = c;
                cell.fg = label.color;
            }
        }

        grid
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        (col < self.cols && row < self.rows).then(|| &self.cells[row * self.cols + col])
    }

    pub fn row_text(&self, row: usize) -> Option<String> {
        (row < self.rows).then(|| {
            self.cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .map(|c| c.ch)
                .collect()
        })
    }
}

fn to_color([r, g, b, _]: Rgba) -> Color {
    Color::Rgb { r, g, b }
}

/// Translate a terminal event into game input
fn map_event(event: Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };

    let interrupt = modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c');
    if kind != KeyEventKind::Release
        && (interrupt || matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')))
    {
        return Some(InputEvent::Quit);
    }

    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        _ => Key::Other,
    };
    Some(match kind {
        KeyEventKind::Press => InputEvent::KeyDown { key, repeat: false },
        KeyEventKind::Repeat => InputEvent::KeyDown { key, repeat: true },
        KeyEventKind::Release => InputEvent::KeyUp { key },
    })
}

/// Autorepeat on plain terminals arrives as fresh presses. An Up press this
/// soon after the previous one is treated as a repeat.
const UP_REPEAT_WINDOW: Duration = Duration::from_millis(700);

/// Marks held-key Up presses as repeats for terminals that cannot report
/// repeat events themselves
#[derive(Debug, Default)]
struct UpDebounce {
    last_press: Option<Instant>,
}

impl UpDebounce {
    fn filter(&mut self, event: InputEvent, now: Instant) -> InputEvent {
        match event {
            InputEvent::KeyDown { key: Key::Up, repeat } => {
                let held = self
                    .last_press
                    .is_some_and(|t| now.saturating_duration_since(t) < UP_REPEAT_WINDOW);
                self.last_press = Some(now);
                InputEvent::KeyDown {
                    key: Key::Up,
                    repeat: repeat || held,
                }
            }
            InputEvent::KeyUp { key: Key::Up } => {
                self.last_press = None;
                event
            }
            _ => event,
        }
    }
}

/// Raw-mode terminal session drawing the playfield
pub struct TerminalFrontend {
    stdout: Stdout,
    frame_time: Duration,
    next_frame: Instant,
    cell_width: u32,
    cell_height: u32,
    bell: bool,
    raw_enabled: bool,
    enhanced_keys: bool,
    up_debounce: UpDebounce,
}

impl TerminalFrontend {
    pub fn new(settings: &Settings) -> Result<Self, InitError> {
        let mut frontend = Self {
            stdout: io::stdout(),
            frame_time: Duration::from_millis(settings.frame_millis.max(1)),
            next_frame: Instant::now(),
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            bell: settings.terminal_bell && !settings.muted,
            raw_enabled: false,
            enhanced_keys: false,
            up_debounce: UpDebounce::default(),
        };
        // On failure the partially set up terminal is restored by Drop
        frontend.enter()?;
        Ok(frontend)
    }

    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_enabled = true;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        // Key release/repeat reporting where the terminal supports it
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }

        let (cols, rows) = CellGrid::dimensions(self.cell_width, self.cell_height);
        let (term_cols, term_rows) = terminal::size()?;
        if (term_cols as usize) < cols || (term_rows as usize) < rows {
            log::warn!(
                "Terminal is {}x{} but the playfield needs {}x{}; output will be clipped",
                term_cols,
                term_rows,
                cols,
                rows
            );
        }
        log::info!("Terminal frontend ready ({}x{} cells)", cols, rows);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.raw_enabled {
            return Ok(());
        }
        if self.enhanced_keys {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        self.raw_enabled = false;
        Ok(())
    }

    fn draw(&mut self, grid: &CellGrid) -> io::Result<()> {
        let mut current: Option<(Rgba, Rgba)> = None;
        for row in 0..grid.rows {
            queue!(self.stdout, cursor::MoveTo(0, row as u16))?;
            for col in 0..grid.cols {
                let Some(cell) = grid.cell(col, row) else {
                    continue;
                };
                if current != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.stdout,
                        SetForegroundColor(to_color(cell.fg)),
                        SetBackgroundColor(to_color(cell.bg))
                    )?;
                    current = Some((cell.fg, cell.bg));
                }
                queue!(self.stdout, Print(cell.ch))?;
            }
        }
        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()
    }
}

impl Frontend for TerminalFrontend {
    /// Waits out the rest of the frame, collecting whatever input arrives
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        loop {
            let timeout = self.next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Some(input) = map_event(event::read()?) {
                let input = if self.enhanced_keys {
                    input
                } else {
                    self.up_debounce.filter(input, Instant::now())
                };
                events.push(input);
            }
        }

        let now = Instant::now();
        self.next_frame += self.frame_time;
        if self.next_frame < now {
            self.next_frame = now + self.frame_time;
        }
        Ok(events)
    }

    fn play(&mut self, effect: SoundEffect) {
        log::debug!("Sound: {:?}", effect);
        if self.bell {
            if let Err(e) = queue!(self.stdout, Print('\u{7}')) {
                log::debug!("Bell failed: {}", e);
            }
        }
    }

    fn present(&mut self, scene: &Scene) -> io::Result<()> {
        let grid = CellGrid::rasterize(scene, self.cell_width, self.cell_height);
        self.draw(&grid)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::colors;
    use crate::sim::{GamePhase, GameSession};

    #[test]
    fn test_span_center_rule() {
        // Brick at x=2..38 with 4px cells: centers 2, 6, .., 34
        assert_eq!(span(2, 36, 4, 100), 0..9);
        // Next brick leaves column 9 empty
        assert_eq!(span(42, 36, 4, 100), 10..19);
    }

    #[test]
    fn test_span_thin_rect_gets_a_cell() {
        // y=80..90 with 12px rows contains no row center (78, 90)
        assert_eq!(span(80, 10, 12, 50), 7..8);
        assert_eq!(span(5, 0, 12, 50), 0..0);
    }

    #[test]
    fn test_span_clipped_to_grid() {
        assert_eq!(span(-40, 20, 4, 100), 0..0);
        assert_eq!(span(390, 40, 4, 100), 97..100);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(CellGrid::dimensions(4, 12), (100, 50));
        assert_eq!(CellGrid::dimensions(0, 0), (400, 600));
    }

    #[test]
    fn test_rasterize_fresh_session() {
        let scene = Scene::from_session(&GameSession::new());
        let grid = CellGrid::rasterize(&scene, 4, 12);
        assert_eq!((grid.cols, grid.rows), (100, 50));

        // Each brick row lands on its own grid row
        let brick_rows: Vec<usize> = (0..grid.rows)
            .filter(|&r| grid.cell(1, r).is_some_and(|c| c.bg != colors::BACKGROUND))
            .collect();
        assert_eq!(brick_rows, vec![3, 5, 7, 8, 10]);
        assert_eq!(grid.cell(1, 3).map(|c| c.bg), Some([255, 0, 0, 255]));

        // Paddle row
        assert_eq!(grid.cell(50, 48).map(|c| c.bg), Some(colors::PADDLE));

        // HUD text
        assert!(grid.row_text(0).unwrap().starts_with(" Score:0"));
        assert!(grid.row_text(0).unwrap().contains("Lives:3"));
        assert!(grid.row_text(26).unwrap().contains("Hit UP to start/pause/resume/quit"));
    }

    #[test]
    fn test_rasterize_game_over() {
        let mut session = GameSession::new();
        session.phase = GamePhase::AllBricksCleared;
        let grid = CellGrid::rasterize(&Scene::from_session(&session), 4, 12);
        assert!(grid.row_text(26).unwrap().contains("Congratulations!"));
        assert!(!grid.row_text(0).unwrap().contains("Score"));
        assert_eq!(grid.row_text(grid.rows), None);
    }

    #[test]
    fn test_map_event_keys() {
        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(
            map_event(press(KeyCode::Left)),
            Some(InputEvent::KeyDown { key: Key::Left, repeat: false })
        );
        assert_eq!(
            map_event(press(KeyCode::Up)),
            Some(InputEvent::KeyDown { key: Key::Up, repeat: false })
        );
        assert_eq!(map_event(press(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(InputEvent::Quit)
        );

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(map_event(release), Some(InputEvent::KeyUp { key: Key::Right }));
        assert_eq!(map_event(Event::FocusLost), None);
    }

    #[test]
    fn test_held_up_on_plain_terminal_becomes_repeat() {
        let up = InputEvent::KeyDown { key: Key::Up, repeat: false };
        let start = Instant::now();
        let mut debounce = UpDebounce::default();

        assert_eq!(debounce.filter(up, start), up);
        // Autorepeat stream
        for ms in [500, 530, 560] {
            assert_eq!(
                debounce.filter(up, start + Duration::from_millis(ms)),
                InputEvent::KeyDown { key: Key::Up, repeat: true }
            );
        }
        // A deliberate second press after letting go
        assert_eq!(debounce.filter(up, start + Duration::from_millis(1500)), up);

        // Other keys pass through untouched
        let left = InputEvent::KeyDown { key: Key::Left, repeat: false };
        assert_eq!(debounce.filter(left, start + Duration::from_millis(1510)), left);
    }

    #[test]
    fn test_up_release_resets_debounce() {
        let up = InputEvent::KeyDown { key: Key::Up, repeat: false };
        let start = Instant::now();
        let mut debounce = UpDebounce::default();
        debounce.filter(up, start);
        debounce.filter(InputEvent::KeyUp { key: Key::Up }, start + Duration::from_millis(50));
        assert_eq!(debounce.filter(up, start + Duration::from_millis(100)), up);
    }
}
