use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

use crate::session::NoticeLevel;

/// Type of toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Error,
}

impl ToastType {
    fn color(self) -> Color {
        match self {
            ToastType::Info => Color::Cyan,
            ToastType::Success => Color::Green,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✓",
            ToastType::Error => "✗",
        }
    }
}

impl From<NoticeLevel> for ToastType {
    fn from(level: NoticeLevel) -> Self {
        match level {
            NoticeLevel::Info => ToastType::Info,
            NoticeLevel::Success => ToastType::Success,
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: String, toast_type: ToastType) -> Self {
        Self {
            message,
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Get the progress of the toast (0.0 = just created, 1.0 = expired)
    pub fn progress(&self) -> f32 {
        let elapsed = self.created_at.elapsed().as_secs_f32();
        let total = self.duration.as_secs_f32().max(f32::EPSILON);
        (elapsed / total).min(1.0)
    }
}

/// Short-lived notices stacked in the top-right corner
#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: 4,
        }
    }

    pub fn add_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);

        // Remove oldest toasts if we exceed the maximum
        while self.toasts.len() > self.max_toasts {
            self.toasts.remove(0);
        }
    }

    pub fn add_info(&mut self, message: String) {
        self.add_toast(Toast::new(message, ToastType::Info));
    }

    pub fn add_error(&mut self, message: String) {
        self.add_toast(Toast::new(message, ToastType::Error).with_duration(Duration::from_secs(5)));
    }

    /// Drop expired toasts
    pub fn update(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn render(&self, area: Rect, buf: &mut TuiBuffer) {
        if self.toasts.is_empty() {
            return;
        }

        let toast_width = 40.min(area.width.saturating_sub(2));
        let x = area.right().saturating_sub(toast_width + 1);

        for (i, toast) in self.toasts.iter().enumerate() {
            let y = area.y + i as u16 * 3;
            if y + 3 > area.bottom() {
                break;
            }
            self.render_single_toast(toast, Rect::new(x, y, toast_width, 3), buf);
        }
    }

    fn render_single_toast(&self, toast: &Toast, area: Rect, buf: &mut TuiBuffer) {
        let primary_color = toast.toast_type.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(primary_color))
            .style(Style::default().bg(Color::Rgb(30, 30, 30)));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let room = (inner_area.width as usize).saturating_sub(2);
        let message = truncate(&toast.message, room);

        let content = Line::from(vec![
            Span::styled(
                format!("{} ", toast.toast_type.icon()),
                Style::default()
                    .fg(primary_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(message, Style::default().fg(Color::White)),
        ]);
        Paragraph::new(content).render(inner_area, buf);
    }
}

/// Shorten `text` to `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    // Only the first line of a multi-line message fits in a toast
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() <= max && first.len() == text.len() {
        return first.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = first.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient widget wrapper for rendering toasts
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        self.manager.render(area, buf);
    }
}
