//! Derived line-number column shown in the gutter.

use crate::buffer::Buffer;

/// Gutter always reserves room for at least this many digits
const MIN_DIGITS: usize = 3;

/// Line labels recomputed from the buffer's newline count.
///
/// After every [`LineNumberColumn::recompute`] the label count equals
/// `1 + number of '\n'` in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumberColumn {
    line_count: usize,
    visible: bool,
}

impl Default for LineNumberColumn {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LineNumberColumn {
    pub fn new(visible: bool) -> Self {
        Self {
            line_count: 1,
            visible,
        }
    }

    /// Recount the buffer's lines
    pub fn recompute(&mut self, buffer: &Buffer) {
        self.line_count = buffer.newline_count() + 1;
    }

    /// Number of labels currently in the column
    pub fn label_count(&self) -> usize {
        self.line_count
    }

    /// Labels `1..=L`
    pub fn labels(&self) -> impl Iterator<Item = usize> {
        1..=self.line_count
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Attach or detach the column, recomputing when it comes back
    pub fn set_visible(&mut self, visible: bool, buffer: &Buffer) {
        self.visible = visible;
        if visible {
            self.recompute(buffer);
        }
    }

    /// Columns taken by the gutter, including one separator space
    pub fn width(&self) -> usize {
        if !self.visible {
            return 0;
        }
        count_digits(self.line_count).max(MIN_DIGITS) + 1
    }

    /// Right-aligned label text for 0-based `row`
    pub fn label(&self, row: usize) -> String {
        format!("{:>width$}", row + 1, width = self.width().saturating_sub(1))
    }
}

/// Count the number of digits in a number
pub fn count_digits(mut n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut digits = 0;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count_tracks_newlines() {
        let mut column = LineNumberColumn::default();
        let mut buffer = Buffer::new();
        column.recompute(&buffer);
        assert_eq!(column.label_count(), 1);

        buffer.insert_newline();
        buffer.insert_newline();
        column.recompute(&buffer);
        assert_eq!(column.label_count(), 3);
        assert_eq!(column.labels().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_width_grows_with_digits() {
        let mut column = LineNumberColumn::default();
        column.recompute(&Buffer::from_text(&"\n".repeat(12_345)));
        assert_eq!(column.width(), 6);
        assert_eq!(column.label(0), "    1");
    }

    #[test]
    fn test_hidden_column_takes_no_space() {
        let buffer = Buffer::new();
        let mut column = LineNumberColumn::default();
        column.set_visible(false, &buffer);
        assert_eq!(column.width(), 0);
    }

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits(0), 1);
        assert_eq!(count_digits(9), 1);
        assert_eq!(count_digits(10), 2);
        assert_eq!(count_digits(12345), 5);
    }
}
