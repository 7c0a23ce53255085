//! Modal prompt widgets: text, integer and color entry plus alerts.
//!
//! Each widget owns its state, draws itself over the current frame and
//! consumes key presses until it produces a [`DialogStep::Submit`] or
//! [`DialogStep::Cancel`].

use std::ops::RangeInclusive;

use ratatui::{
    buffer::Buffer as TuiBuffer,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::buffer::{byte_index, char_len};
use crate::dialogs::AlertKind;
use crate::presentation::Rgb;
use crate::widgets::modal::Modal;

const HINT: &str = "Enter: OK   Esc: Cancel";

/// Result of feeding one key to a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep<T> {
    Continue,
    Submit(T),
    Cancel,
}

/// A modal that can be drawn and driven by keys
pub trait DialogWidget {
    type Output;

    /// Draw the dialog over `area`, returning where the caret belongs
    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position>;

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output>;
}

/// Single-line editable text field
#[derive(Debug, Clone, Default)]
pub struct LineInput {
    value: String,
    cursor: usize, // char index
}

impl LineInput {
    pub fn new(initial: &str) -> Self {
        Self {
            value: initial.to_string(),
            cursor: char_len(initial),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and put the caret at its end
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = char_len(value);
    }

    /// Apply an editing key; false if the key is not an editing key
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let at = byte_index(&self.value, self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = byte_index(&self.value, self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < char_len(&self.value) {
                    let at = byte_index(&self.value, self.cursor);
                    self.value.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(char_len(&self.value)),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = char_len(&self.value),
            _ => return false,
        }
        true
    }

    /// Visible slice for a field `width` cells wide and the caret offset in it
    fn window(&self, width: usize) -> (&str, usize) {
        let width = width.max(1);
        let start = (self.cursor + 1).saturating_sub(width);
        let from = byte_index(&self.value, start);
        let to = byte_index(&self.value, start + width);
        (&self.value[from..to], self.cursor - start)
    }

    /// Render as `> text`, returning the line and the caret column
    pub(crate) fn line(&self, width: u16) -> (Line<'_>, u16) {
        let (visible, caret) = self.window(width.saturating_sub(2) as usize);
        let line = Line::from(vec![
            Span::styled(
                "> ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(visible, Style::default().fg(Color::White)),
        ]);
        (line, 2 + caret as u16)
    }
}

fn hint_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn error_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::LightRed)))
}

fn dialog_width(area: Rect, text: &str) -> u16 {
    (char_len(text) as u16 + 6).clamp(44, area.width.max(44).min(76))
}

/// Free text entry, e.g. a search term or a font family
#[derive(Debug, Clone)]
pub struct TextPrompt {
    title: String,
    prompt: String,
    input: LineInput,
}

impl TextPrompt {
    pub fn new(title: &str, prompt: &str, initial: &str) -> Self {
        Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
            input: LineInput::new(initial),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }
}

impl DialogWidget for TextPrompt {
    type Output = String;

    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position> {
        let width = dialog_width(area, &self.prompt);
        let probe = Modal::new(&self.title).width(width).height(7);
        let inner = probe.inner(area);

        let (input_line, caret) = self.input.line(inner.width);
        let content = vec![
            Line::from(self.prompt.as_str()),
            Line::default(),
            input_line,
            Line::default(),
            hint_line(HINT),
        ];
        probe.content(content).render(area, buf);

        Some(Position::new(inner.x + caret, inner.y + 2))
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<String> {
        match key.code {
            KeyCode::Enter => DialogStep::Submit(self.input.value().to_string()),
            KeyCode::Esc => DialogStep::Cancel,
            _ => {
                self.input.handle_key(key);
                DialogStep::Continue
            }
        }
    }
}

/// Integer entry constrained to a closed range
#[derive(Debug, Clone)]
pub struct IntegerPrompt {
    title: String,
    prompt: String,
    input: LineInput,
    bounds: RangeInclusive<i64>,
    error: Option<String>,
}

impl IntegerPrompt {
    pub fn new(title: &str, prompt: &str, initial: i64, bounds: RangeInclusive<i64>) -> Self {
        Self {
            title: title.to_string(),
            prompt: prompt.to_string(),
            input: LineInput::new(&initial.to_string()),
            bounds,
            error: None,
        }
    }

    /// Message shown for the last rejected entry
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn parse(&self) -> Result<i64, String> {
        let text = self.input.value().trim();
        let value: i64 = text
            .parse()
            .map_err(|_| format!("\"{}\" is not a whole number", text))?;
        if !self.bounds.contains(&value) {
            return Err(format!(
                "Enter a value between {} and {}",
                self.bounds.start(),
                self.bounds.end()
            ));
        }
        Ok(value)
    }
}

impl DialogWidget for IntegerPrompt {
    type Output = i64;

    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position> {
        let width = dialog_width(area, &self.prompt);
        let probe = Modal::new(&self.title).width(width).height(7);
        let inner = probe.inner(area);

        let (input_line, caret) = self.input.line(inner.width);
        let status = match &self.error {
            Some(error) => error_line(error),
            None => Line::default(),
        };
        let content = vec![
            Line::from(self.prompt.as_str()),
            Line::default(),
            input_line,
            status,
            hint_line(HINT),
        ];
        probe.content(content).render(area, buf);

        Some(Position::new(inner.x + caret, inner.y + 2))
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<i64> {
        match key.code {
            KeyCode::Enter => match self.parse() {
                Ok(value) => DialogStep::Submit(value),
                Err(error) => {
                    self.error = Some(error);
                    DialogStep::Continue
                }
            },
            KeyCode::Esc => DialogStep::Cancel,
            KeyCode::Char(c) if !(c.is_ascii_digit() || c == '-' || c == '+') => {
                DialogStep::Continue
            }
            _ => {
                if self.input.handle_key(key) {
                    self.error = None;
                }
                DialogStep::Continue
            }
        }
    }
}

/// Named colors offered by the color picker
pub const PALETTE: [(&str, Rgb); 12] = [
    ("Black", Rgb(0, 0, 0)),
    ("White", Rgb(255, 255, 255)),
    ("Gray", Rgb(128, 128, 128)),
    ("Red", Rgb(205, 49, 49)),
    ("Orange", Rgb(255, 140, 0)),
    ("Yellow", Rgb(229, 229, 16)),
    ("Green", Rgb(13, 188, 121)),
    ("Teal", Rgb(0, 128, 128)),
    ("Blue", Rgb(36, 114, 200)),
    ("Navy", Rgb(0, 0, 128)),
    ("Purple", Rgb(188, 63, 188)),
    ("Brown", Rgb(139, 69, 19)),
];

/// Color chooser: pick from the palette or type `#rrggbb` / `r,g,b`
#[derive(Debug, Clone)]
pub struct ColorPrompt {
    title: String,
    input: LineInput,
    selected: Option<usize>,
    error: Option<String>,
}

impl ColorPrompt {
    pub fn new(title: &str, initial: Rgb) -> Self {
        Self {
            title: title.to_string(),
            input: LineInput::new(&initial.to_hex()),
            selected: PALETTE.iter().position(|(_, rgb)| *rgb == initial),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Color currently described by the input, if it parses
    pub fn current(&self) -> Option<Rgb> {
        self.input.value().trim().parse().ok()
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.input.set(&PALETTE[index].1.to_hex());
        self.error = None;
    }
}

impl DialogWidget for ColorPrompt {
    type Output = Rgb;

    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position> {
        let probe = Modal::new(&self.title)
            .width(44)
            .height(PALETTE.len() as u16 + 8);
        let inner = probe.inner(area);

        let (input_line, caret) = self.input.line(inner.width.saturating_sub(10));
        let mut input_spans = input_line.spans;
        input_spans.push(Span::raw("  "));
        if let Some(rgb) = self.current() {
            input_spans.push(Span::styled("      ", Style::default().bg(rgb.into())));
        }

        let mut content = vec![
            Line::from("Color (#rrggbb or r,g,b):"),
            Line::from(input_spans),
            match &self.error {
                Some(error) => error_line(error),
                None => Line::default(),
            },
        ];
        for (i, (name, rgb)) in PALETTE.iter().enumerate() {
            let marker = if self.selected == Some(i) { "> " } else { "  " };
            let label_style = if self.selected == Some(i) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            content.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled("    ", Style::default().bg((*rgb).into())),
                Span::raw(" "),
                Span::styled(format!("{:<8} {}", name, rgb.to_hex()), label_style),
            ]));
        }
        content.push(Line::default());
        content.push(hint_line("Up/Down: palette   Enter: OK   Esc: Cancel"));
        probe.content(content).render(area, buf);

        Some(Position::new(inner.x + caret, inner.y + 1))
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Rgb> {
        match key.code {
            KeyCode::Enter => match self.input.value().trim().parse::<Rgb>() {
                Ok(rgb) => DialogStep::Submit(rgb),
                Err(e) => {
                    self.error = Some(e.to_string());
                    DialogStep::Continue
                }
            },
            KeyCode::Esc => DialogStep::Cancel,
            KeyCode::Up => {
                let index = match self.selected {
                    Some(0) | None => PALETTE.len() - 1,
                    Some(i) => i - 1,
                };
                self.select(index);
                DialogStep::Continue
            }
            KeyCode::Down => {
                let index = match self.selected {
                    Some(i) if i + 1 < PALETTE.len() => i + 1,
                    _ => 0,
                };
                self.select(index);
                DialogStep::Continue
            }
            _ => {
                if self.input.handle_key(key) {
                    self.selected = None;
                    self.error = None;
                }
                DialogStep::Continue
            }
        }
    }
}

/// Message box dismissed with Enter, Space or Esc
#[derive(Debug, Clone)]
pub struct AlertDialog {
    kind: AlertKind,
    title: String,
    message: String,
}

impl AlertDialog {
    pub fn new(kind: AlertKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

impl DialogWidget for AlertDialog {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut TuiBuffer) -> Option<Position> {
        let widest = self.message.lines().map(char_len).max().unwrap_or(0);
        let width = (widest as u16 + 6).clamp(30, area.width.max(30).min(76));
        let accent = match self.kind {
            AlertKind::Info => Color::Cyan,
            AlertKind::Error => Color::Red,
        };

        let mut content: Vec<Line> = self.message.lines().map(Line::from).collect();
        content.push(Line::default());
        content.push(hint_line("Press Enter to close"));

        Modal::new(&self.title)
            .width(width)
            .height(content.len() as u16 + 2)
            .accent(accent)
            .content(content)
            .render(area, buf);
        None
    }

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<()> {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => DialogStep::Submit(()),
            _ => DialogStep::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str<D: DialogWidget>(dialog: &mut D, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_line_input_edits_at_caret() {
        let mut input = LineInput::new("héllo");
        assert_eq!(input.cursor(), 5);
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Right));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "hllo");
        input.handle_key(key(KeyCode::Char('e')));
        assert_eq!(input.value(), "hello");
        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "hell");
    }

    #[test]
    fn test_line_input_window_follows_caret() {
        let input = LineInput::new("abcdefghij");
        let (visible, caret) = input.window(5);
        assert_eq!(visible, "ghij");
        assert_eq!(caret, 4);
    }

    #[test]
    fn test_text_prompt_submit_and_cancel() {
        let mut prompt = TextPrompt::new("Find", "Find what:", "");
        type_str(&mut prompt, "needle");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            DialogStep::Submit("needle".to_string())
        );

        let mut prompt = TextPrompt::new("Find", "Find what:", "x");
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), DialogStep::Cancel);
    }

    #[test]
    fn test_integer_prompt_rejects_out_of_range() {
        let mut prompt = IntegerPrompt::new("Font Size", "Size:", 11, 8..=72);
        prompt.handle_key(key(KeyCode::Backspace));
        prompt.handle_key(key(KeyCode::Backspace));
        type_str(&mut prompt, "100");

        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert!(prompt.error().is_some());

        prompt.handle_key(key(KeyCode::Backspace));
        assert!(prompt.error().is_none());
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), DialogStep::Submit(10));
    }

    #[test]
    fn test_integer_prompt_ignores_letters() {
        let mut prompt = IntegerPrompt::new("Font Size", "Size:", 12, 8..=72);
        type_str(&mut prompt, "ab");
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), DialogStep::Submit(12));
    }

    #[test]
    fn test_color_prompt_palette_and_typed_value() {
        let mut prompt = ColorPrompt::new("Font Color", Rgb(0, 0, 0));
        prompt.handle_key(key(KeyCode::Down));
        assert_eq!(prompt.current(), Some(Rgb(255, 255, 255)));

        for _ in 0..7 {
            prompt.handle_key(key(KeyCode::Backspace));
        }
        type_str(&mut prompt, "1,2,3");
        assert_eq!(
            prompt.handle_key(key(KeyCode::Enter)),
            DialogStep::Submit(Rgb(1, 2, 3))
        );
    }

    #[test]
    fn test_color_prompt_invalid_stays_open() {
        let mut prompt = ColorPrompt::new("Font Color", Rgb(0, 0, 0));
        type_str(&mut prompt, "zz");
        assert_eq!(prompt.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert!(prompt.error().is_some());
        assert_eq!(prompt.handle_key(key(KeyCode::Esc)), DialogStep::Cancel);
    }

    #[test]
    fn test_alert_renders_message() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = TuiBuffer::empty(area);
        let alert = AlertDialog::new(AlertKind::Error, "Error", "Could not open file");
        assert!(alert.render(area, &mut buf).is_none());

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Could not open file"));
        assert!(text.contains("Error"));
    }
}
