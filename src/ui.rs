use crate::input::coordinates::buffer_to_screen_coords;
use crate::widgets::{Cursor, Editor, MenuBar, MenuDropdown, ToastWidget};
use crate::App;
use ratatui::prelude::*;

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        // Create layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Menu bar
                Constraint::Min(1),    // Editor area
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        self.menu_area = chunks[0];
        let title = self.session.title();
        let colors = self.session.presentation.colors();
        f.render_widget(MenuBar::new(&self.menu, &title, colors), chunks[0]);

        // Render the editor
        self.render_editor(f, chunks[1]);

        // Render status line
        self.render_status_line(f, chunks[2]);

        if self.toast_manager.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toast_manager), chunks[1]);
        }

        // The drop-down hangs below the bar, over everything else
        if let Some(dropdown) = MenuDropdown::new(&self.menu, &self.session.presentation) {
            f.render_widget(dropdown, self.menu_area);
        }
    }

    /// Render the text area, its gutter and the caret
    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        let (_, text_area) = Editor::split(&self.session.line_numbers, area);
        let resized = text_area != self.text_area;
        self.editor_area = area;
        self.text_area = text_area;

        if resized {
            self.ensure_cursor_visible();
        }

        f.render_widget(Editor::new(&self.session, self.scroll_offset), area);

        if self.menu.is_open() {
            return;
        }
        let (row, col) = self.session.buffer.cursor_pos;
        if let Some((x, y)) = buffer_to_screen_coords(self, row, col) {
            let caret = Cursor::new(Position::new(x, y), self.session.presentation.colors().caret.into());
            f.render_stateful_widget(caret, text_area, &mut self.cursor_state);
        }
    }

    /// Render the status line using the StatusBar widget
    fn render_status_line(&mut self, f: &mut Frame, area: Rect) {
        // Update status bar content before rendering
        self.update_status_bar();

        // Render the status bar widget
        f.render_widget(self.status_bar.clone(), area);
    }
}
