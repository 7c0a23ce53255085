//! # Text Buffer Management
//!
//! Core text buffer that represents the single open document.
//!
//! ## What it does
//!
//! - Stores text as lines in memory
//! - Tracks the caret and an optional selection anchor
//! - Handles whole-file loading and saving
//! - Carries the file association (path and display name)
//!
//! ## Columns
//!
//! Every column in this module is a character index into its line, never a
//! byte offset, so multi-byte text can be edited without splitting a
//! character. Use [`byte_index`] to cross over to `str` slicing.
//!
//! ## Round trips
//!
//! Lines are split on `'\n'` only and joined back with `'\n'`, so whatever
//! was read (trailing newline, `\r\n`, no final newline) is written back
//! unchanged.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::DocumentError;

/// Display name of a document with no file association
pub const UNTITLED: &str = "Untitled";

#[derive(Clone, Debug)]
pub struct Buffer {
    pub content: Vec<String>,
    pub path: Option<PathBuf>,
    pub name: String,
    pub modified: bool,
    pub cursor_pos: (usize, usize),              // (row, column)
    pub selection_start: Option<(usize, usize)>, // Anchor of the selection (row, column), if any
    pub visual_mode: bool,                       // Whether a selection is being extended
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            content: vec![String::new()],
            path: None,
            name: String::from(UNTITLED),
            modified: false,
            cursor_pos: (0, 0),
            selection_start: None,
            visual_mode: false,
        }
    }

    /// Build an unassociated buffer holding `text`
    pub fn from_text(text: &str) -> Self {
        Self {
            content: split_lines(text),
            ..Self::new()
        }
    }

    /// Read the whole file at `path` as UTF-8 and associate the buffer with it
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();

        let bytes = fs::read(&path).map_err(|source| DocumentError::Read {
            path: path.clone(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| DocumentError::Decode {
            path: path.clone(),
            source,
        })?;

        let mut buffer = Self::from_text(&text);
        buffer.name = display_name(&path);
        buffer.path = Some(path);
        Ok(buffer)
    }

    /// Get buffer content as a single string, lines joined with `'\n'`
    pub fn content_as_string(&self) -> String {
        // Pre-calculate the total capacity needed
        let total: usize = self.content.iter().map(|line| line.len() + 1).sum();
        let mut result = String::with_capacity(total.saturating_sub(1));

        for (i, line) in self.content.iter().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            result.push_str(line);
        }

        result
    }

    /// Replace the whole content, keeping the caret as close as possible
    pub fn set_text(&mut self, text: &str) {
        self.content = split_lines(text);
        self.clear_selection();
        let (row, col) = self.cursor_pos;
        self.set_cursor(row, col);
        self.modified = true;
    }

    /// Write the buffer to its associated path
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Write the buffer to `path` and associate it with that path on success
    pub fn save_as(&mut self, path: PathBuf) -> Result<(), DocumentError> {
        self.write_to(&path)?;
        self.name = display_name(&path);
        self.path = Some(path);
        self.modified = false;
        Ok(())
    }

    /// Write the exact buffer text to `path`.
    ///
    /// The bytes go to a temporary file next to the destination which is then
    /// renamed over it, so a failed write leaves any existing file intact.
    pub fn write_to(&self, path: &Path) -> Result<(), DocumentError> {
        let write_error = |source: std::io::Error| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };

        // Write through a symlink to the file it points at
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(self.content_as_string().as_bytes())
            .map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;

        // Keep the destination's permissions instead of the temp file's 0600
        let permissions = match fs::metadata(&target) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            file.as_file()
                .set_permissions(permissions)
                .map_err(write_error)?;
        }

        file.persist(&target).map_err(|e| write_error(e.error))?;
        Ok(())
    }

    /// Total number of lines (always at least one)
    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Number of `'\n'` characters in the text
    pub fn newline_count(&self) -> usize {
        self.content.len().saturating_sub(1)
    }

    /// Length of a line in characters
    pub fn line_len(&self, row: usize) -> usize {
        self.content.get(row).map(|line| char_len(line)).unwrap_or(0)
    }

    /// Position just after the last character
    pub fn end_position(&self) -> (usize, usize) {
        let last = self.content.len().saturating_sub(1);
        (last, self.line_len(last))
    }

    /// Move the caret, clamping it into the buffer
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.content.len().saturating_sub(1));
        let col = col.min(self.line_len(row));
        self.cursor_pos = (row, col);
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }

        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
        }

        let line = &mut self.content[row];
        let at = byte_index(line, col);
        line.insert(at, c);
        self.cursor_pos.1 += 1;
        self.modified = true;
    }

    /// Insert a run of text at the caret, splitting lines on `'\n'`
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            self.content.push(String::new());
            self.cursor_pos = (self.content.len() - 1, 0);
            self.modified = true;
            return;
        }

        let at = byte_index(&self.content[row], col);
        let rest = self.content[row].split_off(at);
        self.content.insert(row + 1, rest);

        self.cursor_pos = (row + 1, 0);
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        let (row, col) = self.cursor_pos;
        if col > 0 {
            // Delete character before cursor
            let line = &mut self.content[row];
            let at = byte_index(line, col - 1);
            line.remove(at);
            self.cursor_pos.1 -= 1;
            self.modified = true;
        } else if row > 0 {
            // Join with previous line
            let current_line = self.content.remove(row);
            let prev_line = &mut self.content[row - 1];
            let new_cursor_col = char_len(prev_line);
            prev_line.push_str(&current_line);
            self.cursor_pos = (row - 1, new_cursor_col);
            self.modified = true;
        }
    }

    pub fn delete(&mut self) {
        let (row, col) = self.cursor_pos;
        if row >= self.content.len() {
            return;
        }

        if col < self.line_len(row) {
            // Delete character at cursor
            let line = &mut self.content[row];
            let at = byte_index(line, col);
            line.remove(at);
            self.modified = true;
        } else if row + 1 < self.content.len() {
            // Join with next line
            let next_line = self.content.remove(row + 1);
            self.content[row].push_str(&next_line);
            self.modified = true;
        }
    }

    /// Anchor a selection at the caret unless one is already open
    pub fn begin_selection(&mut self) {
        if !self.visual_mode {
            self.visual_mode = true;
            self.selection_start = Some(self.cursor_pos);
        }
    }

    /// Clear the current selection
    pub fn clear_selection(&mut self) {
        self.selection_start = None;
        self.visual_mode = false;
    }

    /// Select the whole buffer, leaving the caret at the start
    pub fn select_all(&mut self) {
        self.selection_start = Some(self.end_position());
        self.visual_mode = true;
        self.cursor_pos = (0, 0);
    }

    /// Get the current selection range as (start_pos, end_pos)
    /// Returns None if there is no selection or it is empty
    pub fn get_selection_range(&self) -> Option<(Position, Position)> {
        let start = Position::from_tuple(self.selection_start?);
        let end = Position::from_tuple(self.cursor_pos);

        match start.cmp(&end) {
            std::cmp::Ordering::Less => Some((start, end)),
            std::cmp::Ordering::Greater => Some((end, start)),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Get the text content of the current selection
    pub fn get_selected_text(&self) -> Option<String> {
        let (start, end) = self.get_selection_range()?;

        if start.row == end.row {
            let line = &self.content[start.row];
            let from = byte_index(line, start.col);
            let to = byte_index(line, end.col);
            return Some(line[from..to].to_string());
        }

        let mut selected_text = String::new();

        // First line (from start to end of line)
        let first = &self.content[start.row];
        selected_text.push_str(&first[byte_index(first, start.col)..]);
        selected_text.push('\n');

        // Middle lines (whole lines)
        for row in (start.row + 1)..end.row {
            selected_text.push_str(&self.content[row]);
            selected_text.push('\n');
        }

        // Last line (from start of line to end)
        let last = &self.content[end.row];
        selected_text.push_str(&last[..byte_index(last, end.col)]);

        Some(selected_text)
    }

    /// Delete the selected text
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.get_selection_range() else {
            self.clear_selection();
            return false;
        };

        let first = &self.content[start.row];
        let last = &self.content[end.row];

        let mut joined = String::with_capacity(first.len() + last.len());
        joined.push_str(&first[..byte_index(first, start.col)]);
        joined.push_str(&last[byte_index(last, end.col)..]);

        self.content.splice(start.row..=end.row, [joined]);

        // Set cursor to the start of the deleted selection
        self.cursor_pos = start.to_tuple();
        self.clear_selection();
        self.modified = true;
        true
    }

    pub fn move_cursor(&mut self, direction: CursorMovement) {
        let (mut row, mut col) = self.cursor_pos;

        match direction {
            CursorMovement::Up => {
                if row > 0 {
                    row -= 1;
                    col = col.min(self.line_len(row));
                }
            }
            CursorMovement::Down => {
                if row + 1 < self.content.len() {
                    row += 1;
                    col = col.min(self.line_len(row));
                }
            }
            CursorMovement::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = self.line_len(row);
                }
            }
            CursorMovement::Right => {
                if col < self.line_len(row) {
                    col += 1;
                } else if row + 1 < self.content.len() {
                    row += 1;
                    col = 0;
                }
            }
            CursorMovement::LineStart => {
                col = 0;
            }
            CursorMovement::LineEnd => {
                col = self.line_len(row);
            }
            CursorMovement::PageUp(page_size) => {
                row = row.saturating_sub(page_size.max(1));
                col = col.min(self.line_len(row));
            }
            CursorMovement::PageDown(page_size) => {
                row = (row + page_size.max(1)).min(self.content.len() - 1);
                col = col.min(self.line_len(row));
            }
            CursorMovement::BufferStart => {
                row = 0;
                col = 0;
            }
            CursorMovement::BufferEnd => {
                (row, col) = self.end_position();
            }
        }

        self.cursor_pos = (row, col);
    }
}

pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    PageUp(usize),
    PageDown(usize),
    BufferStart,
    BufferEnd,
}

/// Represents a text position (row, column)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert from tuple
    pub fn from_tuple(pos: (usize, usize)) -> Self {
        Self {
            row: pos.0,
            col: pos.1,
        }
    }

    /// Convert to tuple
    pub fn to_tuple(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Byte offset of character column `col` in `line` (clamped to the end)
pub fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// Number of characters in `line`
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Base name shown in the title for `path`
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
