use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Centered bordered box that every dialog is drawn in
pub struct Modal<'a> {
    title: &'a str,
    content: Vec<Line<'a>>,
    width: u16,
    height: u16,
    accent: Color,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            content: Vec::new(),
            width: 60,
            height: 20,
            accent: Color::Cyan,
        }
    }

    pub fn content(mut self, content: Vec<Line<'a>>) -> Self {
        self.content = content;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Border and title color
    pub fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Where the modal lands inside `area`, shrunk to fit
    pub fn centered_rect(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length((area.width.saturating_sub(width)) / 2),
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(popup_layout[1])[1]
    }

    /// Content area inside the borders
    pub fn inner(&self, area: Rect) -> Rect {
        Block::default()
            .borders(Borders::ALL)
            .inner(self.centered_rect(area))
    }
}

impl Widget for Modal<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let modal_area = self.centered_rect(area);

        // Clear the background
        Clear.render(modal_area, buf);

        let border_style = Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD);
        let title_style = Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(Color::Black));

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        Paragraph::new(self.content)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Left)
            .render(inner_area, buf);
    }
}
