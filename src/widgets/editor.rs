use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
};
use unicode_width::UnicodeWidthChar;

use crate::buffer::{char_len, Buffer, Position};
use crate::input::coordinates::{cell_width, cells_between, layout_segments};
use crate::line_numbers::LineNumberColumn;
use crate::presentation::PresentationState;
use crate::search::Match;
use crate::session::EditorSession;

/// Text area with its line-number gutter
pub struct Editor<'a> {
    pub buffer: &'a Buffer,
    pub line_numbers: &'a LineNumberColumn,
    pub highlights: &'a [Match],
    pub presentation: &'a PresentationState,
    pub scroll_offset: (usize, usize), // (row, col) offset for viewport scrolling
}

impl<'a> Editor<'a> {
    pub fn new(session: &'a EditorSession, scroll_offset: (usize, usize)) -> Self {
        Self {
            buffer: &session.buffer,
            line_numbers: &session.line_numbers,
            highlights: &session.highlights,
            presentation: &session.presentation,
            scroll_offset,
        }
    }

    /// Split `area` into the gutter and the text area
    pub fn split(line_numbers: &LineNumberColumn, area: Rect) -> (Rect, Rect) {
        let gutter_width = (line_numbers.width() as u16).min(area.width);
        let gutter = Rect::new(area.x, area.y, gutter_width, area.height);
        let text = Rect::new(
            area.x + gutter_width,
            area.y,
            area.width - gutter_width,
            area.height,
        );
        (gutter, text)
    }

    fn char_style(
        &self,
        selection: Option<(Position, Position)>,
        row: usize,
        col: usize,
        base: Style,
    ) -> Style {
        let colors = self.presentation.colors();
        let pos = Position::new(row, col);

        if selection.is_some_and(|(start, end)| start <= pos && pos < end) {
            return base.bg(colors.selection_bg.into());
        }
        if self.highlights.iter().any(|m| m.contains(row, col)) {
            return base
                .bg(colors.highlight_bg.into())
                .fg(colors.highlight_fg.into());
        }
        base
    }
}

impl Widget for Editor<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let colors = self.presentation.colors();
        let text_style = Style::default()
            .fg(self.presentation.text_fg().into())
            .bg(colors.text_bg.into());
        let gutter_style = Style::default()
            .fg(colors.gutter_fg.into())
            .bg(colors.gutter_bg.into());

        let (gutter, text) = Self::split(self.line_numbers, area);
        buf.set_style(gutter, gutter_style);
        buf.set_style(text, text_style);
        if text.width == 0 || text.height == 0 {
            return;
        }

        let segments = layout_segments(
            self.buffer,
            self.scroll_offset,
            text.width as usize,
            text.height as usize,
            self.presentation.wrap,
        );
        let selection = self.buffer.get_selection_range();

        for (i, segment) in segments.iter().enumerate() {
            let y = text.y + i as u16;

            if self.line_numbers.is_visible() && segment.first {
                buf.set_string(gutter.x, y, self.line_numbers.label(segment.row), gutter_style);
            }

            let line = &self.buffer.content[segment.row];
            let mut x = 0usize;
            let visible = line
                .chars()
                .skip(segment.start)
                .take(segment.end.saturating_sub(segment.start));
            for (offset, ch) in visible.enumerate() {
                let width = cell_width(ch);
                if x + width > text.width as usize {
                    break;
                }
                let col = segment.start + offset;
                let style = self.char_style(selection, segment.row, col, text_style);
                if ch.is_control() || ch.width().unwrap_or(0) == 0 {
                    if let Some(cell) = buf.cell_mut((text.x + x as u16, y)) {
                        cell.set_char(' ').set_style(style);
                    }
                } else {
                    let mut utf8 = [0u8; 4];
                    buf.set_stringn(text.x + x as u16, y, ch.encode_utf8(&mut utf8), width, style);
                }
                x += width;
            }

            // Mark a selected line break with one cell past the end of the row
            if segment.last {
                let end_col = segment.end.min(char_len(line));
                let offset = cells_between(line, segment.start, end_col);
                let eol_selected = selection.is_some_and(|(start, end)| {
                    let pos = Position::new(segment.row, end_col);
                    start <= pos && pos < end
                });
                if eol_selected && offset < text.width as usize && end_col >= segment.start {
                    if let Some(cell) = buf.cell_mut((text.x + offset as u16, y)) {
                        cell.set_style(text_style.bg(colors.selection_bg.into()));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::Wrap;

    fn row_text(buf: &TuiBuffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()))
            .collect()
    }

    #[test]
    fn test_gutter_labels_only_first_wrapped_row() {
        let buffer = Buffer::from_text("aaaa bbbb\nc");
        let mut line_numbers = LineNumberColumn::new(true);
        line_numbers.recompute(&buffer);
        let presentation = PresentationState::default();

        let editor = Editor {
            buffer: &buffer,
            line_numbers: &line_numbers,
            highlights: &[],
            presentation: &presentation,
            scroll_offset: (0, 0),
        };
        let area = Rect::new(0, 0, 9, 4);
        let mut buf = TuiBuffer::empty(area);
        editor.render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "  1 aaaa ");
        assert_eq!(row_text(&buf, 1), "    bbbb ");
        assert_eq!(row_text(&buf, 2), "  2 c    ");
    }

    #[test]
    fn test_no_wrap_scrolls_horizontally() {
        let buffer = Buffer::from_text("0123456789");
        let line_numbers = LineNumberColumn::new(false);
        let presentation = PresentationState {
            wrap: Wrap::None,
            ..PresentationState::default()
        };

        let editor = Editor {
            buffer: &buffer,
            line_numbers: &line_numbers,
            highlights: &[],
            presentation: &presentation,
            scroll_offset: (0, 4),
        };
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = TuiBuffer::empty(area);
        editor.render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "4567");
    }

    #[test]
    fn test_wide_characters_take_two_cells() {
        let buffer = Buffer::from_text("日本x");
        let line_numbers = LineNumberColumn::new(false);
        let presentation = PresentationState::default();

        let editor = Editor {
            buffer: &buffer,
            line_numbers: &line_numbers,
            highlights: &[],
            presentation: &presentation,
            scroll_offset: (0, 0),
        };
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = TuiBuffer::empty(area);
        editor.render(area, &mut buf);

        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("日"));
        assert_eq!(buf.cell((2, 0)).map(|c| c.symbol()), Some("本"));
        assert_eq!(buf.cell((4, 0)).map(|c| c.symbol()), Some("x"));
    }

    #[test]
    fn test_highlights_use_theme_colors() {
        let buffer = Buffer::from_text("find me");
        let line_numbers = LineNumberColumn::new(false);
        let presentation = PresentationState::default();
        let highlights = [Match {
            start: Position::new(0, 5),
            end: Position::new(0, 7),
        }];

        let editor = Editor {
            buffer: &buffer,
            line_numbers: &line_numbers,
            highlights: &highlights,
            presentation: &presentation,
            scroll_offset: (0, 0),
        };
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = TuiBuffer::empty(area);
        editor.render(area, &mut buf);

        let yellow: ratatui::style::Color = presentation.colors().highlight_bg.into();
        assert_eq!(buf.cell((5, 0)).map(|c| c.bg), Some(yellow));
        assert_ne!(buf.cell((4, 0)).map(|c| c.bg), Some(yellow));
    }
}
