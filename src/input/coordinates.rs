// Coordinate conversion between buffer positions and screen cells

use unicode_width::UnicodeWidthChar;

use crate::buffer::{char_len, Buffer};
use crate::presentation::Wrap;
use crate::App;

/// One screen row of text: characters `start..end` of buffer row `row`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub row: usize,
    pub start: usize,
    pub end: usize,
    /// First screen row of its buffer row (carries the line number)
    pub first: bool,
    /// Last screen row of its buffer row
    pub last: bool,
}

impl Segment {
    /// Whether the caret at (`row`, `col`) is drawn on this segment
    pub fn holds(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.start && (col < self.end || (self.last && col == self.end))
    }
}

/// Terminal cells taken by `ch`.
///
/// Control and zero-width characters are drawn as one blank cell.
pub fn cell_width(ch: char) -> usize {
    if ch.is_control() {
        return 1;
    }
    UnicodeWidthChar::width(ch).unwrap_or(1).max(1)
}

/// Cells taken by characters `start..end` of `line`
pub fn cells_between(line: &str, start: usize, end: usize) -> usize {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .map(cell_width)
        .sum()
}

/// Character index reached `cells` cells to the right of character `start`.
///
/// A cell inside a wide character maps to that character.
pub fn col_at_cell(line: &str, start: usize, cells: usize) -> usize {
    let mut used = 0;
    let mut col = start;
    for ch in line.chars().skip(start) {
        let w = cell_width(ch);
        if used + w > cells {
            return col;
        }
        used += w;
        col += 1;
    }
    col
}

/// Split `line` into chunks at most `width` cells wide, breaking after the
/// last space that fits and mid-word only when a word is too long
pub fn wrap_line(line: &str, width: usize) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, bool)> = line.chars().map(|c| (cell_width(c), c == ' ')).collect();
    let width = width.max(1);
    let mut segments = Vec::new();
    let mut start = 0;
    let mut used = 0;
    // Index just past the last space in the current chunk
    let mut brk: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let (w, is_space) = chars[i];
        if used + w > width && i > start {
            let end = brk.filter(|&b| b > start).unwrap_or(i);
            segments.push((start, end));
            start = end;
            used = chars[start..i].iter().map(|&(w, _)| w).sum();
            brk = None;
            continue;
        }
        used += w;
        if is_space {
            brk = Some(i + 1);
        }
        i += 1;
    }
    segments.push((start, chars.len()));
    segments
}

/// Segments of buffer row `row` laid out `width` columns wide
pub fn row_segments(buffer: &Buffer, row: usize, width: usize, wrap: Wrap, scroll_col: usize) -> Vec<Segment> {
    let Some(line) = buffer.content.get(row) else {
        return Vec::new();
    };

    match wrap {
        Wrap::Word => {
            let chunks = wrap_line(line, width);
            let count = chunks.len();
            chunks
                .into_iter()
                .enumerate()
                .map(|(i, (start, end))| Segment {
                    row,
                    start,
                    end,
                    first: i == 0,
                    last: i + 1 == count,
                })
                .collect()
        }
        Wrap::None => {
            let start = scroll_col;
            let end = col_at_cell(line, start, width).max(start);
            vec![Segment {
                row,
                start,
                end,
                first: true,
                last: true,
            }]
        }
    }
}

/// Screen rows shown for a `width` x `height` text area scrolled to `scroll`
pub fn layout_segments(
    buffer: &Buffer,
    scroll: (usize, usize),
    width: usize,
    height: usize,
    wrap: Wrap,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(height);
    let mut row = scroll.0;

    while segments.len() < height && row < buffer.content.len() {
        for segment in row_segments(buffer, row, width, wrap, scroll.1) {
            if segments.len() == height {
                break;
            }
            segments.push(segment);
        }
        row += 1;
    }
    segments
}

/// Index of the wrapped chunk of `line` that holds the caret at `col`
pub fn segment_index(line: &str, col: usize, width: usize) -> usize {
    let chunks = wrap_line(line, width);
    let last = chunks.len() - 1;
    chunks
        .iter()
        .position(|&(start, end)| col >= start && col < end)
        .unwrap_or(last)
}

/// Segments currently on screen
pub fn visible_segments(app: &App) -> Vec<Segment> {
    layout_segments(
        &app.session.buffer,
        app.scroll_offset,
        app.text_area.width as usize,
        app.text_area.height as usize,
        app.session.presentation.wrap,
    )
}

/// Convert screen coordinates to buffer coordinates.
///
/// Clicks in the line-number gutter land at the start of that screen row;
/// clicks below the text land at the end of the buffer.
pub fn screen_to_buffer_coords(app: &App, mouse_x: u16, mouse_y: u16) -> Option<(usize, usize)> {
    let area = app.editor_area;
    if mouse_x < area.x
        || mouse_x >= area.x + area.width
        || mouse_y < area.y
        || mouse_y >= area.y + area.height
    {
        return None;
    }

    let buffer = &app.session.buffer;
    let relative_x = mouse_x.saturating_sub(app.text_area.x) as usize;
    let relative_y = (mouse_y - area.y) as usize;

    let segments = visible_segments(app);
    let Some(segment) = segments.get(relative_y) else {
        return Some(buffer.end_position());
    };

    let line_len = char_len(&buffer.content[segment.row]);
    let max_col = if segment.last {
        line_len
    } else {
        segment.end.saturating_sub(1).max(segment.start)
    };
    let line = &buffer.content[segment.row];
    let col = col_at_cell(line, segment.start, relative_x)
        .min(max_col)
        .min(line_len);
    Some((segment.row, col))
}

/// Convert buffer coordinates to screen coordinates, if on screen
pub fn buffer_to_screen_coords(app: &App, buffer_row: usize, buffer_col: usize) -> Option<(u16, u16)> {
    let area = app.text_area;
    if area.width == 0 || area.height == 0 {
        return None;
    }

    let segments = visible_segments(app);
    let (index, segment) = segments
        .iter()
        .enumerate()
        .find(|(_, segment)| segment.holds(buffer_row, buffer_col))?;

    let line = app.session.buffer.content.get(buffer_row)?;
    let offset = cells_between(line, segment.start, buffer_col);
    let x = match app.session.presentation.wrap {
        // A caret after a full-width chunk sits on the last cell
        Wrap::Word => offset.min(area.width as usize - 1),
        Wrap::None if offset >= area.width as usize => return None,
        Wrap::None => offset,
    };

    Some((area.x + x as u16, area.y + index as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_breaks_after_spaces() {
        assert_eq!(wrap_line("hello world foo", 8), vec![(0, 6), (6, 12), (12, 15)]);
    }

    #[test]
    fn test_wrap_line_splits_long_words() {
        assert_eq!(wrap_line("abcdefghij", 4), vec![(0, 4), (4, 8), (8, 10)]);
        assert_eq!(wrap_line("", 4), vec![(0, 0)]);
        assert_eq!(wrap_line("abcd", 4), vec![(0, 4)]);
    }

    #[test]
    fn test_wrap_line_counts_wide_characters_as_two_cells() {
        // Each ideograph is two cells wide
        assert_eq!(wrap_line("日本語です", 4), vec![(0, 2), (2, 4), (4, 5)]);
        assert_eq!(wrap_line("ab 日本", 4), vec![(0, 3), (3, 5)]);
    }

    #[test]
    fn test_cell_offsets_skip_wide_characters() {
        assert_eq!(cells_between("a日b", 0, 2), 3);
        assert_eq!(col_at_cell("a日b", 0, 1), 1);
        // The second half of the ideograph still belongs to it
        assert_eq!(col_at_cell("a日b", 0, 2), 1);
        assert_eq!(col_at_cell("a日b", 0, 3), 2);
        assert_eq!(col_at_cell("a日b", 0, 10), 3);
        assert_eq!(cell_width('\t'), 1);
    }

    #[test]
    fn test_layout_segments_fills_height() {
        let buffer = Buffer::from_text("aaaa bbbb\ncc\ndd");
        let segments = layout_segments(&buffer, (0, 0), 5, 3, Wrap::Word);
        assert_eq!(segments.len(), 3);
        assert_eq!((segments[0].row, segments[0].first, segments[0].last), (0, true, false));
        assert_eq!((segments[1].row, segments[1].first, segments[1].last), (0, false, true));
        assert_eq!(segments[2].row, 1);

        let segments = layout_segments(&buffer, (1, 0), 5, 10, Wrap::None);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_segment_holds_caret_at_row_end_only_on_last_chunk() {
        let buffer = Buffer::from_text("aaaa bbbb");
        let segments = row_segments(&buffer, 0, 5, Wrap::Word, 0);
        assert!(!segments[0].holds(0, 5));
        assert!(segments[1].holds(0, 5));
        assert!(segments[1].holds(0, 9));
        assert_eq!(segment_index("aaaa bbbb", 9, 5), 1);
        assert_eq!(segment_index("aaaa bbbb", 2, 5), 0);
    }
}
