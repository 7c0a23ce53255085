use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer as TuiBuffer,
    crossterm::{event, execute, terminal::SetTitle},
    layout::Rect,
    style::{Modifier, Style},
    Terminal,
};
use tracing::{debug, error, info};

use crate::buffer::{display_name, Buffer};
use crate::clipboard::Clipboard;
use crate::commands::Command;
use crate::config::Config;
use crate::dialogs::{Dialogs, TerminalDialogs};
use crate::events::{AppEvent, EventBus};
use crate::handlers::{AppStateHandler, KeyboardHandler, MouseHandler};
use crate::input_system::InputSystem;
use crate::session::{CommandOutcome, EditorSession};
use crate::widgets::{CursorState, MenuState, SlotAlignment, StatusBar, StatusSlot, Toast, ToastManager};

/// Contains global state of the editor window
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// Document, presentation and derived views
    pub session: EditorSession,

    /// Scroll position: first buffer row shown and, without wrap, first column
    pub scroll_offset: (usize, usize),

    /// Open drop-down menu, if any
    pub menu: MenuState,

    /// Toast notification manager
    pub toast_manager: ToastManager,

    /// Status bar with slot-based system
    pub status_bar: StatusBar,

    /// Last message for the status bar
    pub status_message: Option<String>,

    /// Caret blink state
    pub cursor_state: CursorState,

    /// Menu bar row, as last drawn
    pub menu_area: Rect,

    /// Gutter plus text, as last drawn
    pub editor_area: Rect,

    /// Text part of the editor, as last drawn
    pub text_area: Rect,

    /// Mouse drag start position for text selection
    pub mouse_drag_start: Option<(usize, usize)>,

    /// Spaces inserted by Tab
    pub tab_size: usize,

    /// Last completed frame; dialogs are drawn over it
    pub backdrop: TuiBuffer,

    /// Pending events
    pub event_bus: EventBus,
}

impl App {
    pub fn new(config: &Config, clipboard: Clipboard) -> Self {
        let mut app = Self {
            running: true,
            session: EditorSession::new(config.presentation(), clipboard),
            scroll_offset: (0, 0),
            menu: MenuState::default(),
            toast_manager: ToastManager::new(),
            status_bar: StatusBar::new(),
            status_message: None,
            cursor_state: CursorState::default(),
            menu_area: Rect::default(),
            editor_area: Rect::default(),
            text_area: Rect::default(),
            mouse_drag_start: None,
            tab_size: config.editor.tab_size.max(1),
            backdrop: TuiBuffer::empty(Rect::default()),
            event_bus: EventBus::new(),
        };

        app.init_status_bar();
        app
    }

    /// Start with `path` open; a path that does not exist yet becomes the
    /// save target of an empty document
    pub fn with_file(config: &Config, clipboard: Clipboard, path: &Path) -> Result<Self> {
        let mut app = Self::new(config, clipboard);

        if path.exists() {
            app.session
                .load_path(path)
                .map_err(|e| anyhow!("Failed to open file '{}': {}", path.display(), e))?;
        } else {
            info!(path = %path.display(), "Starting new file");
            let mut buffer = Buffer::new();
            buffer.name = display_name(path);
            buffer.path = Some(path.to_path_buf());
            app.session.edit(|b| *b = buffer);
        }

        Ok(app)
    }

    /// Run the application until Exit
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let input_system = InputSystem::new(self.event_bus.sender());
        let keyboard_handler = KeyboardHandler::new(self.event_bus.sender());
        let mouse_handler = MouseHandler::new(self.event_bus.sender());
        let app_state_handler = AppStateHandler::new();

        let mut window_title = String::new();
        info!("Editor started");

        while self.running {
            let title = self.session.title();
            if title != window_title {
                execute!(terminal.backend_mut(), SetTitle(&title))?;
                window_title = title;
            }

            self.draw(terminal)?;

            // Poll with a timeout so toasts expire and the caret blinks
            if event::poll(Duration::from_millis(50))? {
                input_system.handle_event(event::read()?)?;
            }

            while let Some(event) = self.event_bus.try_next() {
                let event_type = event.event_type();
                let result = match event {
                    AppEvent::KeyInput(key) => keyboard_handler.handle_key_event(self, key),
                    AppEvent::MouseInput(mouse) => mouse_handler.handle_mouse_event(self, mouse),
                    AppEvent::Command(command) => {
                        let mut dialogs = TerminalDialogs::new(terminal, self.backdrop.clone());
                        self.run_command(command, &mut dialogs)
                    }
                    other => app_state_handler.handle_event(self, other),
                };

                if let Err(e) = result {
                    error!("Error handling {} event: {:#}", event_type, e);
                    self.toast_manager.add_error(format!("{}", e));
                }
                if !self.running {
                    break;
                }
            }
        }

        info!("Editor stopped");
        Ok(())
    }

    /// Draw one frame and keep it as the dialog backdrop
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.toast_manager.update();
        let frame = terminal.draw(|f| self.render(f))?;
        self.backdrop = frame.buffer.clone();
        Ok(())
    }

    /// Run `command`, asking the user through `dialogs`
    pub fn run_command(&mut self, command: Command, dialogs: &mut dyn Dialogs) -> Result<()> {
        debug!(?command, "Running command");
        self.menu.close();
        self.mouse_drag_start = None;

        let outcome = self.session.execute(command, dialogs)?;
        if outcome == CommandOutcome::Quit {
            self.running = false;
        }

        for notice in self.session.take_notices() {
            self.status_message = Some(notice.message.clone());
            self.toast_manager
                .add_toast(Toast::new(notice.message, notice.level.into()));
        }

        self.ensure_cursor_visible();
        self.cursor_state.notify_activity();
        Ok(())
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        let file_slot = StatusSlot::new("file", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(100)
            .with_max_width(32);
        self.status_bar.set_slot(file_slot);

        let cursor_slot = StatusSlot::new("cursor", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(90);
        self.status_bar.set_slot(cursor_slot);

        let modified_slot = StatusSlot::new("modified", "")
            .with_alignment(SlotAlignment::Left)
            .with_priority(80)
            .with_style(Style::default().add_modifier(Modifier::BOLD));
        self.status_bar.set_slot(modified_slot);

        // Selection size replaces the message while something is selected
        let selection_slot = StatusSlot::new("selection", "")
            .with_alignment(SlotAlignment::Center)
            .with_priority(70)
            .with_visibility(false);
        self.status_bar.set_slot(selection_slot);

        let message_slot = StatusSlot::new("message", "")
            .with_alignment(SlotAlignment::Center)
            .with_priority(60)
            .with_max_width(48);
        self.status_bar.set_slot(message_slot);

        let font_slot = StatusSlot::new("font", "")
            .with_alignment(SlotAlignment::Right)
            .with_priority(100);
        self.status_bar.set_slot(font_slot);

        let wrap_slot = StatusSlot::new("wrap", "")
            .with_alignment(SlotAlignment::Right)
            .with_priority(90);
        self.status_bar.set_slot(wrap_slot);

        let theme_slot = StatusSlot::new("theme", "")
            .with_alignment(SlotAlignment::Right)
            .with_priority(80);
        self.status_bar.set_slot(theme_slot);
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        let buffer = &self.session.buffer;
        let presentation = &self.session.presentation;
        let colors = presentation.colors();
        let (row, col) = buffer.cursor_pos;

        self.status_bar.set_background_style(
            Style::default()
                .fg(colors.window_fg.into())
                .bg(colors.window_bg.into()),
        );

        self.status_bar.update_slot_content("file", buffer.name.clone());
        self.status_bar
            .update_slot_content("cursor", format!("Ln {}, Col {}", row + 1, col + 1));
        self.status_bar
            .update_slot_content("modified", if buffer.modified { "Modified" } else { "" });

        if let Some(selected_text) = buffer.get_selected_text() {
            let char_count = selected_text.chars().count();
            let line_count = selected_text.matches('\n').count() + 1;
            let selection_info = if line_count > 1 {
                format!("Selection: {} lines, {} chars", line_count, char_count)
            } else {
                format!("Selection: {} chars", char_count)
            };
            self.status_bar.update_slot_content("selection", selection_info);
            self.status_bar.show_slot("selection");
            self.status_bar.hide_slot("message");
        } else {
            self.status_bar.hide_slot("selection");
            self.status_bar.show_slot("message");
        }
        self.status_bar
            .update_slot_content("message", self.status_message.clone().unwrap_or_default());

        self.status_bar
            .update_slot_content("font", presentation.font.to_string());
        let wrap = if presentation.wrap.is_enabled() {
            "Wrap"
        } else {
            "No Wrap"
        };
        self.status_bar.update_slot_content("wrap", wrap);
        self.status_bar
            .update_slot_content("theme", presentation.theme.label());
    }
}
