//! Literal, case-sensitive text search and whole-buffer replacement.

use std::ops::Range;

use crate::buffer::Position;

/// One occurrence of the search term, as buffer positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: Position,
    pub end: Position,
}

impl Match {
    /// Whether the character at (`row`, `col`) falls inside this match
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let pos = Position::new(row, col);
        self.start <= pos && pos < self.end
    }
}

/// Byte ranges of every non-overlapping occurrence of `needle` in `haystack`.
///
/// The scan resumes right after the end of each match, so in `"ababab"` the
/// term `"aba"` is found once, at offset 0.
pub fn find_all(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    if needle.is_empty() {
        return ranges;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();
        ranges.push(start..end);
        from = end;
    }

    ranges
}

/// Number of non-overlapping occurrences of `needle`
pub fn count_matches(haystack: &str, needle: &str) -> usize {
    find_all(haystack, needle).len()
}

/// Replace every occurrence of `needle`, returning the new text and the count.
///
/// Returns `None` when the term does not occur, so callers can leave the
/// buffer untouched.
pub fn replace_all(haystack: &str, needle: &str, replacement: &str) -> Option<(String, usize)> {
    let count = count_matches(haystack, needle);
    if count == 0 {
        return None;
    }
    Some((haystack.replace(needle, replacement), count))
}

/// Convert byte ranges of `text` into (row, char column) matches.
///
/// `ranges` must be sorted and non-overlapping, as [`find_all`] returns them.
pub fn to_matches(text: &str, ranges: &[Range<usize>]) -> Vec<Match> {
    let mut matches = Vec::with_capacity(ranges.len());
    let mut walker = PositionWalker::new(text);

    for range in ranges {
        let start = walker.advance_to(range.start);
        let end = walker.advance_to(range.end);
        matches.push(Match { start, end });
    }

    matches
}

/// Walks forward through a text translating byte offsets to positions
struct PositionWalker<'a> {
    text: &'a str,
    offset: usize,
    row: usize,
    col: usize,
}

impl<'a> PositionWalker<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            row: 0,
            col: 0,
        }
    }

    fn advance_to(&mut self, target: usize) -> Position {
        for c in self.text[self.offset..target].chars() {
            if c == '\n' {
                self.row += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
        self.offset = target;
        Position::new(self.row, self.col)
    }
}
