use ratatui::{prelude::*, widgets::StatefulWidget};
use std::time::{Duration, Instant};

/// Block caret drawn into the text area in the theme's caret color
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Screen position of the caret
    pub position: Position,
    /// Caret color
    pub color: Color,
}

/// Blink state for the caret
#[derive(Debug, Clone)]
pub struct CursorState {
    /// Last update time for blinking
    pub last_blink: Instant,
    /// Whether cursor is in blink-on phase
    pub blink_on: bool,
    /// Last activity time (typing, cursor movement, etc.)
    pub last_activity: Instant,
    /// Duration to keep cursor solid after activity before starting to blink
    pub activity_timeout: Duration,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            last_blink: Instant::now(),
            blink_on: true,
            last_activity: Instant::now(),
            activity_timeout: Duration::from_millis(1000),
        }
    }
}

impl CursorState {
    /// Keep the caret solid for a while after input
    pub fn notify_activity(&mut self) {
        self.last_activity = Instant::now();
        self.blink_on = true;
    }

    /// Whether the caret is drawn this frame
    fn tick(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last_activity) < self.activity_timeout {
            return true;
        }
        if now.duration_since(self.last_blink) > Duration::from_millis(500) {
            self.blink_on = !self.blink_on;
            self.last_blink = now;
        }
        self.blink_on
    }
}

impl Cursor {
    pub fn new(position: Position, color: Color) -> Self {
        Self { position, color }
    }
}

impl StatefulWidget for Cursor {
    type State = CursorState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.tick() || !area.contains(self.position) {
            return;
        }

        if let Some(cell) = buf.cell_mut(self.position) {
            // Invert against the caret color so the character under it stays readable
            let under = cell.bg;
            cell.set_bg(self.color);
            cell.set_fg(under);
        }
    }
}
