//! Directory browser used for Open and Save As.
//!
//! Entries are listed directories first, then files, each group sorted by
//! name. The filter only narrows the files shown; directories always stay
//! visible so the user can navigate.

use std::fs;
use std::path::{Path, PathBuf};

use ratatui::{
    buffer::Buffer as TuiBuffer,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use tracing::debug;

use crate::dialogs::prompt::{DialogStep, DialogWidget, LineInput};
use crate::widgets::modal::Modal;

/// Extension appended to save names that have none
pub const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Open,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    #[default]
    Text,
    All,
}

impl FileFilter {
    pub fn toggled(self) -> Self {
        match self {
            FileFilter::Text => FileFilter::All,
            FileFilter::All => FileFilter::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileFilter::Text => "Text Files (*.txt)",
            FileFilter::All => "All Files (*.*)",
        }
    }

    pub fn matches(self, name: &str) -> bool {
        match self {
            FileFilter::Text => Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DEFAULT_EXTENSION)),
            FileFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub is_dir: bool,
}

impl PickerEntry {
    fn parent() -> Self {
        Self {
            name: "..".to_string(),
            is_dir: true,
        }
    }

    fn is_parent(&self) -> bool {
        self.name == ".."
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Name,
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    mode: PickerMode,
    filter: FileFilter,
    dir: PathBuf,
    entries: Vec<PickerEntry>,
    selected: usize,
    name: LineInput,
    focus: Focus,
    error: Option<String>,
}

impl FilePicker {
    /// Picker for choosing an existing file
    pub fn open(start_dir: &Path) -> Self {
        Self::new(PickerMode::Open, start_dir, "")
    }

    /// Picker for choosing a save destination, prefilled with `suggested_name`
    pub fn save(start_dir: &Path, suggested_name: &str) -> Self {
        Self::new(PickerMode::Save, start_dir, suggested_name)
    }

    fn new(mode: PickerMode, start_dir: &Path, name: &str) -> Self {
        let mut picker = Self {
            mode,
            filter: FileFilter::default(),
            dir: start_dir.to_path_buf(),
            entries: Vec::new(),
            selected: 0,
            name: LineInput::new(name),
            focus: match mode {
                PickerMode::Open => Focus::List,
                PickerMode::Save => Focus::Name,
            },
            error: None,
        };
        picker.refresh();
        picker
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected)
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-read the current directory
    pub fn refresh(&mut self) {
        self.error = None;
        let mut entries = Vec::new();

        match fs::read_dir(&self.dir) {
            Ok(read_dir) => {
                for entry in read_dir.flatten() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    // Follow symlinks so linked directories can be entered
                    let is_dir = fs::metadata(entry.path())
                        .map(|meta| meta.is_dir())
                        .unwrap_or(false);
                    if is_dir || self.filter.matches(&name) {
                        entries.push(PickerEntry { name, is_dir });
                    }
                }
            }
            Err(e) => {
                debug!(dir = %self.dir.display(), "Cannot list directory: {}", e);
                self.error = Some(format!("Cannot read directory: {}", e));
            }
        }

        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        if self.dir.parent().is_some() {
            entries.insert(0, PickerEntry::parent());
        }

        self.entries = entries;
        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    /// Show a different directory
    pub fn navigate(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.selected = 0;
        self.refresh();
    }

    pub fn go_up(&mut self) {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let child = self
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.navigate(parent);

        if let Some(child) = child {
            if let Some(index) = self.entries.iter().position(|e| e.is_dir && e.name == child) {
                self.selected = index;
            }
        }
    }

    pub fn toggle_filter(&mut self) {
        self.filter = self.filter.toggled();
        self.selected = 0;
        self.refresh();
    }

    fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    fn enter_entry(&mut self) -> DialogStep<PathBuf> {
        let Some(entry) = self.selected().cloned() else {
            return DialogStep::Continue;
        };

        if entry.is_parent() {
            self.go_up();
            return DialogStep::Continue;
        }
        let path = self.dir.join(&entry.name);
        if entry.is_dir {
            self.navigate(path);
            return DialogStep::Continue;
        }

        match self.mode {
            PickerMode::Open => DialogStep::Submit(path),
            PickerMode::Save => {
                self.name.set(&entry.name);
                DialogStep::Submit(path)
            }
        }
    }

    fn submit_name(&mut self) -> DialogStep<PathBuf> {
        let name = self.name.value().trim().to_string();
        if name.is_empty() {
            self.error = Some("Enter a file name".to_string());
            return DialogStep::Continue;
        }

        let path = self.dir.join(&name);
        if path.is_dir() {
            self.name.set("");
            self.navigate(path);
            return DialogStep::Continue;
        }

        DialogStep::Submit(with_default_extension(path))
    }

    fn list_height(&self, inner: Rect) -> usize {
        let reserved = match self.mode {
            PickerMode::Open => 5,
            PickerMode::Save => 7,
        };
        (inner.height as usize).saturating_sub(reserved).max(1)
    }
}

/// Append the default extension when `path` has none
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

impl DialogWidget for FilePicker {
    type Output = PathBuf;

    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position> {
        let title = match self.mode {
            PickerMode::Open => "Open",
            PickerMode::Save => "Save As",
        };
        let height = area.height.saturating_sub(2).clamp(10, 24);
        let probe = Modal::new(title).width(72).height(height);
        let inner = probe.inner(area);
        let rows = self.list_height(inner);
        let first = (self.selected + 1).saturating_sub(rows);

        let dim = Style::default().fg(Color::DarkGray);
        let mut content = vec![
            Line::from(vec![
                Span::styled("Folder: ", dim),
                Span::styled(
                    self.dir.display().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Type:   ", dim),
                Span::raw(self.filter.label()),
            ]),
        ];

        let list_focused = self.focus == Focus::List;
        for (i, entry) in self.entries.iter().enumerate().skip(first).take(rows) {
            let label = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let style = if i == self.selected && list_focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if i == self.selected {
                Style::default().fg(Color::Black).bg(Color::Gray)
            } else if entry.is_dir {
                Style::default().fg(Color::LightBlue)
            } else {
                Style::default().fg(Color::White)
            };
            content.push(Line::from(Span::styled(format!(" {} ", label), style)));
        }
        if self.entries.is_empty() {
            content.push(Line::from(Span::styled(" (empty)", dim)));
        }
        while content.len() < rows + 2 {
            content.push(Line::default());
        }

        let mut caret = None;
        if self.mode == PickerMode::Save {
            let (input_line, x) = self.name.line(inner.width.saturating_sub(6));
            let mut spans = vec![Span::styled("Name:", dim)];
            spans.extend(input_line.spans);
            content.push(Line::default());
            if self.focus == Focus::Name {
                caret = Some(Position::new(
                    inner.x + 5 + x,
                    inner.y + content.len() as u16,
                ));
            }
            content.push(Line::from(spans));
        }

        content.push(match &self.error {
            Some(error) => Line::from(Span::styled(error.as_str(), Style::default().fg(Color::LightRed))),
            None => Line::default(),
        });
        let hint = match self.mode {
            PickerMode::Open => "Enter: open   Backspace: up   F2: file type   Esc: cancel",
            PickerMode::Save => "Enter: save   Tab: list/name   F2: file type   Esc: cancel",
        };
        content.push(Line::from(Span::styled(hint, dim)));

        probe.content(content).render(area, buf);
        caret
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<PathBuf> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return DialogStep::Continue;
        }

        match key.code {
            KeyCode::Esc => return DialogStep::Cancel,
            KeyCode::F(2) => {
                self.toggle_filter();
                return DialogStep::Continue;
            }
            KeyCode::Tab | KeyCode::BackTab if self.mode == PickerMode::Save => {
                self.focus = match self.focus {
                    Focus::List => Focus::Name,
                    Focus::Name => Focus::List,
                };
                return DialogStep::Continue;
            }
            _ => {}
        }

        if self.focus == Focus::Name {
            return match key.code {
                KeyCode::Enter => self.submit_name(),
                KeyCode::Up | KeyCode::Down => {
                    self.focus = Focus::List;
                    DialogStep::Continue
                }
                _ => {
                    if self.name.handle_key(key) {
                        self.error = None;
                    }
                    DialogStep::Continue
                }
            };
        }

        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Backspace | KeyCode::Left => self.go_up(),
            KeyCode::Right => {
                if self.selected().is_some_and(|e| e.is_dir && !e.is_parent()) {
                    return self.enter_entry();
                }
            }
            KeyCode::Enter => return self.enter_entry(),
            KeyCode::Char(_) if self.mode == PickerMode::Save => {
                self.focus = Focus::Name;
                self.name.handle_key(key);
            }
            _ => {}
        }
        DialogStep::Continue
    }
}
