use crate::buffer::CursorMovement;
use crate::commands::{Command, Menu};
use crate::events::{AppEvent, EventSender};
use crate::App;
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard handler that processes keyboard events
pub struct KeyboardHandler {
    event_sender: EventSender,
}

impl KeyboardHandler {
    /// Create a new keyboard handler
    pub fn new(event_sender: EventSender) -> Self {
        Self { event_sender }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&self, app: &mut App, key: KeyEvent) -> Result<()> {
        if app.menu.is_open() {
            return self.handle_menu_key(app, key);
        }

        // Menu mnemonics and F10 take precedence over shortcuts
        if key.code == KeyCode::F(10) {
            app.menu.open(Menu::File);
            return Ok(());
        }
        if let (KeyCode::Char(c), KeyModifiers::ALT) = (key.code, key.modifiers) {
            if let Some(menu) = Menu::from_mnemonic(c) {
                app.menu.open(menu);
                return Ok(());
            }
        }

        if let Some(command) = Command::from_key(key) {
            self.event_sender.send(AppEvent::Command(command))?;
            return Ok(());
        }

        self.handle_editor_key(app, key);
        app.ensure_cursor_visible();
        app.cursor_state.notify_activity();
        Ok(())
    }

    /// Keys while a drop-down menu is open
    fn handle_menu_key(&self, app: &mut App, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => app.menu.close(),
            KeyCode::Left => app.menu.prev_menu(),
            KeyCode::Right => app.menu.next_menu(),
            KeyCode::Up => app.menu.move_selection(false),
            KeyCode::Down => app.menu.move_selection(true),
            KeyCode::Enter => {
                if let Some(command) = app.menu.selected_command() {
                    app.menu.close();
                    self.event_sender.send(AppEvent::Command(command))?;
                }
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                match Menu::from_mnemonic(c) {
                    Some(menu) if app.menu.current() == Some(menu) => app.menu.close(),
                    Some(menu) => app.menu.open(menu),
                    None => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Caret movement and text entry
    fn handle_editor_key(&self, app: &mut App, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = app.page_size();

        match key.code {
            KeyCode::Esc => {
                if app.session.buffer.visual_mode {
                    app.session.buffer.clear_selection();
                    app.set_status_message("Selection cleared");
                }
            }
            KeyCode::Up => self.handle_cursor_movement(app, CursorMovement::Up, key.modifiers),
            KeyCode::Down => self.handle_cursor_movement(app, CursorMovement::Down, key.modifiers),
            KeyCode::Left => self.handle_cursor_movement(app, CursorMovement::Left, key.modifiers),
            KeyCode::Right => {
                self.handle_cursor_movement(app, CursorMovement::Right, key.modifiers)
            }
            KeyCode::Home => {
                let movement = if ctrl {
                    CursorMovement::BufferStart
                } else {
                    CursorMovement::LineStart
                };
                self.handle_cursor_movement(app, movement, key.modifiers);
            }
            KeyCode::End => {
                let movement = if ctrl {
                    CursorMovement::BufferEnd
                } else {
                    CursorMovement::LineEnd
                };
                self.handle_cursor_movement(app, movement, key.modifiers);
            }
            KeyCode::PageUp => {
                self.handle_cursor_movement(app, CursorMovement::PageUp(page), key.modifiers)
            }
            KeyCode::PageDown => {
                self.handle_cursor_movement(app, CursorMovement::PageDown(page), key.modifiers)
            }
            // Text input
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.handle_insert(app, |buffer| buffer.insert_char(c));
            }
            KeyCode::Enter => self.handle_insert(app, |buffer| buffer.insert_newline()),
            KeyCode::Tab => {
                let indent = " ".repeat(app.tab_size);
                self.handle_insert(app, |buffer| buffer.insert_str(&indent));
            }
            KeyCode::Backspace => self.handle_erase(app, |buffer| buffer.backspace()),
            KeyCode::Delete => self.handle_erase(app, |buffer| buffer.delete()),
            _ => {} // Ignore other key combinations
        }
    }

    /// Move the caret; Shift extends the selection, anything else drops it
    fn handle_cursor_movement(&self, app: &mut App, movement: CursorMovement, modifiers: KeyModifiers) {
        let buffer = &mut app.session.buffer;
        if modifiers.contains(KeyModifiers::SHIFT) {
            buffer.begin_selection();
        } else {
            buffer.clear_selection();
        }
        buffer.move_cursor(movement);
    }

    /// Typed text replaces the selection
    fn handle_insert(&self, app: &mut App, insert: impl FnOnce(&mut crate::buffer::Buffer)) {
        // Typing retires the last notice
        app.clear_status_message();
        app.session.edit(|buffer| {
            if buffer.visual_mode {
                buffer.delete_selection();
            }
            insert(buffer);
        });
    }

    /// Backspace and Delete remove the selection instead of one character
    fn handle_erase(&self, app: &mut App, erase: impl FnOnce(&mut crate::buffer::Buffer)) {
        app.session.edit(|buffer| {
            if buffer.get_selection_range().is_some() {
                buffer.delete_selection();
            } else {
                buffer.clear_selection();
                erase(buffer);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::Clipboard;
    use crate::config::Config;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn setup(text: &str) -> (App, KeyboardHandler) {
        let mut app = App::new(&Config::default(), Clipboard::in_memory());
        app.session.edit(|buffer| buffer.set_text(text));
        let handler = KeyboardHandler::new(app.event_bus.sender());
        (app, handler)
    }

    #[test]
    fn test_typing_replaces_selection() {
        let (mut app, handler) = setup("hello world");
        app.session.buffer.set_cursor(0, 5);
        app.set_status_message("Saved");
        handler
            .handle_key_event(&mut app, press(KeyCode::Home, KeyModifiers::SHIFT))
            .unwrap();
        handler
            .handle_key_event(&mut app, press(KeyCode::Char('J'), KeyModifiers::SHIFT))
            .unwrap();

        assert_eq!(app.session.buffer.content_as_string(), "J world");
        assert!(app.session.buffer.get_selection_range().is_none());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_shortcut_publishes_command() {
        let (mut app, handler) = setup("");
        handler
            .handle_key_event(&mut app, press(KeyCode::Char('f'), KeyModifiers::CONTROL))
            .unwrap();

        match app.event_bus.try_next() {
            Some(AppEvent::Command(Command::Find)) => {}
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(app.session.buffer.content_as_string(), "");
    }

    #[test]
    fn test_menu_navigation_runs_selected_entry() {
        let (mut app, handler) = setup("");
        handler
            .handle_key_event(&mut app, press(KeyCode::Char('e'), KeyModifiers::ALT))
            .unwrap();
        assert_eq!(app.menu.current(), Some(Menu::Edit));

        handler
            .handle_key_event(&mut app, press(KeyCode::Down, KeyModifiers::NONE))
            .unwrap();
        handler
            .handle_key_event(&mut app, press(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();

        assert!(!app.menu.is_open());
        match app.event_bus.try_next() {
            Some(AppEvent::Command(Command::Copy)) => {}
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_tab_inserts_spaces() {
        let (mut app, handler) = setup("x");
        handler
            .handle_key_event(&mut app, press(KeyCode::Tab, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.session.buffer.content_as_string(), "    x");
    }

    #[test]
    fn test_enter_updates_line_numbers() {
        let (mut app, handler) = setup("ab");
        app.session.buffer.set_cursor(0, 1);
        handler
            .handle_key_event(&mut app, press(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(app.session.line_numbers.label_count(), 2);
    }
}
