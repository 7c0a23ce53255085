/// Mouse input handlers
use crate::events::{AppEvent, EventSender};
use crate::input::coordinates::screen_to_buffer_coords;
use crate::widgets::menu_bar::{dropdown_area, entry_at, menu_at};
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Lines moved per wheel notch
const SCROLL_LINES: isize = 3;

/// Mouse handler that processes mouse events
pub struct MouseHandler {
    event_sender: EventSender,
}

impl MouseHandler {
    /// Create a new mouse handler
    pub fn new(event_sender: EventSender) -> Self {
        Self { event_sender }
    }

    /// Handle mouse events
    pub fn handle_mouse_event(&self, app: &mut App, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.handle_menu_click(app, mouse.column, mouse.row)? {
                    self.handle_click(app, mouse.column, mouse.row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.handle_drag(app, mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                // Selection is finalized
                app.mouse_drag_start = None;
            }
            MouseEventKind::ScrollUp => app.handle_mouse_scroll(-SCROLL_LINES),
            MouseEventKind::ScrollDown => app.handle_mouse_scroll(SCROLL_LINES),
            MouseEventKind::ScrollLeft => app.handle_horizontal_scroll(-SCROLL_LINES),
            MouseEventKind::ScrollRight => app.handle_horizontal_scroll(SCROLL_LINES),
            _ => {}
        }

        Ok(())
    }

    /// Clicks on the menu bar or an open drop-down; true when consumed
    fn handle_menu_click(&self, app: &mut App, x: u16, y: u16) -> Result<bool> {
        let bar = app.menu_area;
        if bar.contains(Position::new(x, y)) {
            match menu_at(bar, x) {
                Some(menu) if app.menu.current() == Some(menu) => app.menu.close(),
                Some(menu) => app.menu.open(menu),
                None => app.menu.close(),
            }
            return Ok(true);
        }

        let Some(menu) = app.menu.current() else {
            return Ok(false);
        };

        let screen = app.backdrop.area;
        let area = dropdown_area(menu, bar, screen);
        if area.contains(Position::new(x, y)) {
            if let Some(index) = entry_at(menu, area, x, y) {
                if app.menu.select(index) {
                    if let Some(command) = app.menu.selected_command() {
                        app.menu.close();
                        self.event_sender.send(AppEvent::Command(command))?;
                    }
                }
            }
            return Ok(true);
        }

        // Clicking anywhere else dismisses the menu
        app.menu.close();
        Ok(true)
    }

    /// Handle mouse click to position cursor
    fn handle_click(&self, app: &mut App, x: u16, y: u16) {
        let Some((row, col)) = screen_to_buffer_coords(app, x, y) else {
            return;
        };

        let buffer = &mut app.session.buffer;
        buffer.clear_selection();
        buffer.set_cursor(row, col);

        // Start potential drag selection
        app.mouse_drag_start = Some((row, col));
        app.ensure_cursor_visible();
        app.cursor_state.notify_activity();
    }

    /// Handle mouse drag for text selection
    fn handle_drag(&self, app: &mut App, x: u16, y: u16) {
        let Some(start) = app.mouse_drag_start else {
            return;
        };
        let Some((row, col)) = screen_to_buffer_coords(app, x, y) else {
            return;
        };

        let buffer = &mut app.session.buffer;
        if !buffer.visual_mode {
            buffer.visual_mode = true;
            buffer.selection_start = Some(start);
        }
        buffer.set_cursor(row, col);
        app.ensure_cursor_visible();
        app.cursor_state.notify_activity();
    }
}
