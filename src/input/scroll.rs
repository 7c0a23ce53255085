/// Scroll handling module
use crate::buffer::char_len;
use crate::input::coordinates::{cell_width, segment_index, wrap_line};
use crate::presentation::Wrap;
use crate::App;

impl App {
    /// Scroll the view by `delta` buffer rows without moving the caret
    pub fn handle_mouse_scroll(&mut self, delta: isize) {
        let last_row = self.session.buffer.line_count().saturating_sub(1);
        self.scroll_offset.0 = self.scroll_offset.0.saturating_add_signed(delta).min(last_row);
    }

    /// Scroll sideways by `delta` columns; a no-op while word wrap is on
    pub fn handle_horizontal_scroll(&mut self, delta: isize) {
        let max_col = self.get_max_scroll_col();
        self.scroll_offset.1 = self.scroll_offset.1.saturating_add_signed(delta).min(max_col);
    }

    /// Rows moved by Page Up / Page Down
    pub fn page_size(&self) -> usize {
        (self.text_area.height as usize).max(1)
    }

    /// Scroll so the caret is inside the text area
    pub fn ensure_cursor_visible(&mut self) {
        let height = self.text_area.height as usize;
        let width = self.text_area.width as usize;
        if height == 0 || width == 0 {
            return;
        }

        let buffer = &self.session.buffer;
        let (row, col) = buffer.cursor_pos;
        let (mut scroll_row, mut scroll_col) = self.scroll_offset;

        match self.session.presentation.wrap {
            Wrap::None => {
                if row < scroll_row {
                    scroll_row = row;
                } else if row >= scroll_row + height {
                    scroll_row = row + 1 - height;
                }

                if col < scroll_col {
                    scroll_col = col;
                } else {
                    scroll_col = first_fitting(&buffer.content[row], scroll_col, col, width);
                }
            }
            Wrap::Word => {
                scroll_col = 0;
                if row < scroll_row {
                    scroll_row = row;
                } else {
                    // Walk up from the caret while the rows above still fit
                    let mut used = segment_index(&buffer.content[row], col, width) + 1;
                    let mut top = row;
                    while top > scroll_row {
                        let rows = wrap_line(&buffer.content[top - 1], width).len();
                        if used + rows > height {
                            break;
                        }
                        used += rows;
                        top -= 1;
                    }
                    scroll_row = top;
                }
            }
        }

        self.scroll_offset = (scroll_row, scroll_col);
    }

    /// Get the maximum horizontal scroll position for the current buffer
    pub fn get_max_scroll_col(&self) -> usize {
        if self.session.presentation.wrap.is_enabled() {
            return 0;
        }

        let width = self.text_area.width as usize;
        self.session
            .buffer
            .content
            .iter()
            .map(|line| {
                let len = char_len(line);
                first_fitting(line, 0, len, width)
            })
            .max()
            .unwrap_or(0)
    }
}

/// Leftmost column at or after `scroll_col` that keeps the caret cell at
/// `col` inside a view `width` cells wide
fn first_fitting(line: &str, scroll_col: usize, col: usize, width: usize) -> usize {
    let chars: Vec<usize> = line.chars().take(col + 1).map(cell_width).collect();
    let mut used = chars.get(col).copied().unwrap_or(1);
    let mut start = col;
    while start > scroll_col && used + chars[start - 1] <= width {
        used += chars[start - 1];
        start -= 1;
    }
    start
}
