//! # Editor session
//!
//! The one owned object behind the editor window: the document and its file
//! association, presentation state, the line-number column and the search
//! highlights. Every command from the menu or a shortcut lands in
//! [`EditorSession::execute`]. Handlers ask the user through the
//! [`Dialogs`] boundary, so the whole session runs headless in tests.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, error, info};

use crate::buffer::{Buffer, UNTITLED};
use crate::clipboard::Clipboard;
use crate::commands::Command;
use crate::dialogs::{AlertKind, Dialogs};
use crate::error::DocumentError;
use crate::line_numbers::LineNumberColumn;
use crate::presentation::{PresentationState, Theme, Wrap, FONT_SIZE_RANGE};
use crate::search::{self, Match};

/// Product name used in titles and the About box
pub const APP_NAME: &str = "Jotpad";

/// What the shell should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// Non-blocking feedback for the shell to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
}

#[derive(Debug)]
pub struct EditorSession {
    /// The document, including its file association
    pub buffer: Buffer,

    /// Font, colors, wrap, theme and gutter preference
    pub presentation: PresentationState,

    /// Derived gutter labels
    pub line_numbers: LineNumberColumn,

    /// Ranges found by the last Find
    pub highlights: Vec<Match>,

    /// Last term entered in Find or Replace, offered again next time
    pub last_search: String,

    clipboard: Clipboard,
    notices: Vec<Notice>,
}

impl EditorSession {
    pub fn new(presentation: PresentationState, clipboard: Clipboard) -> Self {
        let buffer = Buffer::new();
        let mut line_numbers = LineNumberColumn::new(presentation.show_line_numbers);
        line_numbers.recompute(&buffer);

        Self {
            buffer,
            presentation,
            line_numbers,
            highlights: Vec::new(),
            last_search: String::new(),
            clipboard,
            notices: Vec::new(),
        }
    }

    /// Window title, e.g. `notes.txt - Jotpad`
    pub fn title(&self) -> String {
        format!("{} - {}", self.buffer.name, APP_NAME)
    }

    /// Path the document is associated with, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.buffer.path.as_deref()
    }

    /// Run one command to completion
    pub fn execute(&mut self, command: Command, dialogs: &mut dyn Dialogs) -> Result<CommandOutcome> {
        debug!(?command, "Executing command");

        match command {
            Command::New => self.new_document(),
            Command::Open => self.open(dialogs)?,
            Command::Save => self.save(dialogs)?,
            Command::SaveAs => self.save_as(dialogs)?,
            Command::Exit => {
                info!("Exit requested");
                return Ok(CommandOutcome::Quit);
            }
            Command::Cut => {
                self.cut();
            }
            Command::Copy => {
                self.copy();
            }
            Command::Paste => self.paste(),
            Command::SelectAll => self.select_all(),
            Command::Find => self.find(dialogs)?,
            Command::Replace => self.replace(dialogs)?,
            Command::FontStyle => self.change_font_family(dialogs)?,
            Command::FontSize => self.change_font_size(dialogs)?,
            Command::FontColor => self.change_font_color(dialogs)?,
            Command::ToggleWordWrap => {
                self.toggle_word_wrap();
            }
            Command::ToggleLineNumbers => {
                self.toggle_line_numbers();
            }
            Command::ToggleDarkMode => {
                self.toggle_dark_mode();
            }
            Command::About => self.about(dialogs)?,
        }

        Ok(CommandOutcome::Continue)
    }

    /// Drain the notices produced since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    // ---- File -------------------------------------------------------------

    /// Discard the document and its association without asking
    pub fn new_document(&mut self) {
        info!("New document");
        self.replace_buffer(Buffer::new());
    }

    pub fn open(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let Some(path) = dialogs.open_file(&self.start_dir())? else {
            debug!("Open cancelled");
            return Ok(());
        };

        match self.load_path(path) {
            Ok(()) => {
                let message = format!("Opened {}", self.buffer.name);
                self.notify(NoticeLevel::Success, message);
            }
            Err(e) => {
                dialogs.alert(
                    AlertKind::Error,
                    "Error",
                    &format!("Could not open file:\n{}", e),
                )?;
            }
        }
        Ok(())
    }

    /// Replace the document with the file at `path`.
    ///
    /// On failure the current document is left exactly as it was.
    pub fn load_path(&mut self, path: impl Into<PathBuf>) -> Result<(), DocumentError> {
        let path = path.into();
        match Buffer::load(&path) {
            Ok(buffer) => {
                info!(path = %path.display(), lines = buffer.line_count(), "Opened file");
                self.replace_buffer(buffer);
                Ok(())
            }
            Err(e) => {
                error!(path = %path.display(), "Open failed: {}", e);
                Err(e)
            }
        }
    }

    /// Write to the associated path, or fall back to Save As
    pub fn save(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        if self.buffer.path.is_none() {
            return self.save_as(dialogs);
        }

        match self.buffer.save() {
            Ok(()) => {
                info!(path = ?self.buffer.path, "Saved file");
                let message = format!("Saved {}", self.buffer.name);
                self.notify(NoticeLevel::Success, message);
            }
            Err(e) => {
                error!("Save failed: {}", e);
                dialogs.alert(
                    AlertKind::Error,
                    "Error",
                    &format!("Could not save file:\n{}", e),
                )?;
            }
        }
        Ok(())
    }

    pub fn save_as(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let suggested = if self.buffer.path.is_some() {
            self.buffer.name.clone()
        } else {
            format!("{}.txt", UNTITLED)
        };

        let Some(path) = dialogs.save_file(&self.start_dir(), &suggested)? else {
            debug!("Save As cancelled");
            return Ok(());
        };

        match self.buffer.save_as(path) {
            Ok(()) => {
                info!(path = ?self.buffer.path, "Saved file");
                let message = format!("Saved {}", self.buffer.name);
                self.notify(NoticeLevel::Success, message);
            }
            Err(e) => {
                error!("Save As failed: {}", e);
                dialogs.alert(
                    AlertKind::Error,
                    "Error",
                    &format!("Could not save file:\n{}", e),
                )?;
            }
        }
        Ok(())
    }

    /// Directory pickers start in: the document's, else the working directory
    fn start_dir(&self) -> PathBuf {
        self.buffer
            .path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.buffer_changed();
    }

    // ---- Edit -------------------------------------------------------------

    /// Apply an edit to the buffer and refresh everything derived from it
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Buffer) -> R) -> R {
        let result = f(&mut self.buffer);
        self.buffer_changed();
        result
    }

    fn buffer_changed(&mut self) {
        self.highlights.clear();
        self.line_numbers.recompute(&self.buffer);
    }

    /// Recount gutter labels after input that may have moved things around
    pub fn refresh_line_numbers(&mut self) {
        self.line_numbers.recompute(&self.buffer);
    }

    /// Move the selection to the clipboard; false when nothing is selected
    pub fn cut(&mut self) -> bool {
        let Some(text) = self.buffer.get_selected_text() else {
            return false;
        };
        self.clipboard.set_text(text);
        self.edit(|buffer| buffer.delete_selection());
        true
    }

    /// Copy the selection to the clipboard; false when nothing is selected
    pub fn copy(&mut self) -> bool {
        let Some(text) = self.buffer.get_selected_text() else {
            return false;
        };
        self.clipboard.set_text(text);
        true
    }

    /// Insert the clipboard text, replacing any selection
    pub fn paste(&mut self) {
        let text = self.clipboard.get_text();
        if text.is_empty() {
            return;
        }
        self.edit(|buffer| {
            if buffer.get_selection_range().is_some() {
                buffer.delete_selection();
            }
            buffer.clear_selection();
            buffer.insert_str(&text);
        });
    }

    pub fn select_all(&mut self) {
        self.buffer.select_all();
    }

    // ---- Search -----------------------------------------------------------

    pub fn find(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let initial = self.last_search.clone();
        let Some(term) = dialogs.prompt_text("Find", "Find what:", &initial)? else {
            return Ok(());
        };
        if term.is_empty() {
            return Ok(());
        }

        let count = self.find_text(&term);
        let message = match count {
            0 => format!("\"{}\" not found", term),
            1 => "Found 1 match".to_string(),
            n => format!("Found {} matches", n),
        };
        dialogs.alert(AlertKind::Info, "Find", &message)?;
        Ok(())
    }

    /// Highlight every occurrence of `term` and return how many there are
    pub fn find_text(&mut self, term: &str) -> usize {
        let text = self.buffer.content_as_string();
        let ranges = search::find_all(&text, term);
        self.highlights = search::to_matches(&text, &ranges);
        self.last_search = term.to_string();

        if let Some(first) = self.highlights.first() {
            self.buffer.clear_selection();
            self.buffer.set_cursor(first.start.row, first.start.col);
        }

        debug!(term, count = self.highlights.len(), "Find");
        self.highlights.len()
    }

    pub fn replace(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let initial = self.last_search.clone();
        let Some(term) = dialogs.prompt_text("Replace", "Find what:", &initial)? else {
            return Ok(());
        };
        if term.is_empty() {
            return Ok(());
        }
        let Some(replacement) = dialogs.prompt_text("Replace", "Replace with:", "")? else {
            return Ok(());
        };

        let count = self.replace_text(&term, &replacement);
        let message = match count {
            0 => format!("\"{}\" not found", term),
            1 => "Replaced 1 occurrence".to_string(),
            n => format!("Replaced {} occurrences", n),
        };
        dialogs.alert(AlertKind::Info, "Replace", &message)?;
        Ok(())
    }

    /// Replace every occurrence of `term` and return the count.
    ///
    /// The buffer is untouched when the term does not occur.
    pub fn replace_text(&mut self, term: &str, replacement: &str) -> usize {
        self.last_search = term.to_string();

        let text = self.buffer.content_as_string();
        let Some((replaced, count)) = search::replace_all(&text, term, replacement) else {
            return 0;
        };

        info!(term, count, "Replaced text");
        self.edit(|buffer| buffer.set_text(&replaced));
        count
    }

    // ---- Format -----------------------------------------------------------

    pub fn change_font_family(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let current = self.presentation.font.family.clone();
        let Some(family) = dialogs.prompt_text("Font Style", "Font family:", &current)? else {
            return Ok(());
        };

        if self.presentation.set_font_family(&family) {
            self.refresh_line_numbers();
            let message = format!("Font: {}", self.presentation.font);
            self.notify(NoticeLevel::Info, message);
        }
        Ok(())
    }

    pub fn change_font_size(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let prompt = format!(
            "Size ({}-{}):",
            FONT_SIZE_RANGE.start(),
            FONT_SIZE_RANGE.end()
        );
        let current = i64::from(self.presentation.font.size);
        let Some(size) = dialogs.prompt_integer("Font Size", &prompt, current, FONT_SIZE_RANGE)?
        else {
            return Ok(());
        };

        if self.presentation.set_font_size(size) {
            self.refresh_line_numbers();
            let message = format!("Font: {}", self.presentation.font);
            self.notify(NoticeLevel::Info, message);
        }
        Ok(())
    }

    pub fn change_font_color(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let current = self.presentation.text_fg();
        let Some(color) = dialogs.pick_color("Font Color", current)? else {
            return Ok(());
        };

        self.presentation.set_font_color(color);
        self.notify(NoticeLevel::Info, format!("Font color {}", color));
        Ok(())
    }

    pub fn toggle_word_wrap(&mut self) -> Wrap {
        let wrap = self.presentation.toggle_wrap();
        let message = if wrap.is_enabled() {
            "Word wrap on"
        } else {
            "Word wrap off"
        };
        self.notify(NoticeLevel::Info, message);
        wrap
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        let visible = self.presentation.toggle_line_numbers();
        self.line_numbers.set_visible(visible, &self.buffer);
        let message = if visible {
            "Line numbers shown"
        } else {
            "Line numbers hidden"
        };
        self.notify(NoticeLevel::Info, message);
        visible
    }

    pub fn toggle_dark_mode(&mut self) -> Theme {
        let theme = self.presentation.toggle_theme();
        self.notify(NoticeLevel::Info, format!("{} theme", theme.label()));
        theme
    }

    // ---- Help -------------------------------------------------------------

    pub fn about(&mut self, dialogs: &mut dyn Dialogs) -> Result<()> {
        let message = format!(
            "{} {}\nA simple notepad for the terminal\nBuilt with Rust and Ratatui",
            APP_NAME,
            env!("CARGO_PKG_VERSION")
        );
        dialogs.alert(AlertKind::Info, &format!("About {}", APP_NAME), &message)
    }
}
