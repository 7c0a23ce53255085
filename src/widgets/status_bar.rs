use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashMap;

/// Represents the alignment of a status bar slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAlignment {
    Left,
    Center,
    Right,
}

/// Represents a single slot in the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    pub priority: u8, // Higher priority = shown first within alignment group
    pub style: Option<Style>, // Bar style when unset
    pub visible: bool,
    pub max_width: Option<u16>,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50,
            style: None,
            visible: true,
            max_width: None,
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_max_width(mut self, max_width: u16) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Slot text after applying the width limit
    fn display_text(&self) -> String {
        match self.max_width {
            Some(max) if self.content.chars().count() > max as usize => {
                let mut text: String = self
                    .content
                    .chars()
                    .take((max as usize).saturating_sub(3))
                    .collect();
                text.push_str("...");
                text
            }
            _ => self.content.clone(),
        }
    }
}

/// Status bar widget with slot-based system similar to VS Code
#[derive(Debug, Clone)]
pub struct StatusBar {
    slots: HashMap<String, StatusSlot>,
    background_style: Style,
    separator: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            background_style: Style::default(),
            separator: " | ".to_string(),
        }
    }

    /// Add or update a slot in the status bar
    pub fn set_slot(&mut self, slot: StatusSlot) {
        self.slots.insert(slot.id.clone(), slot);
    }

    /// Remove a slot from the status bar
    pub fn remove_slot(&mut self, id: &str) {
        self.slots.remove(id);
    }

    pub fn slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.get(id)
    }

    /// Hide a slot without removing it
    pub fn hide_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = false;
        }
    }

    /// Show a previously hidden slot
    pub fn show_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = true;
        }
    }

    /// Update the content of a slot
    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.content = content.into();
        }
    }

    /// Style of the bar and of slots without their own
    pub fn set_background_style(&mut self, style: Style) {
        self.background_style = style;
    }

    /// Set the separator between slots
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Get all visible slots grouped by alignment and sorted by priority
    fn get_organized_slots(&self) -> [Vec<&StatusSlot>; 3] {
        let mut groups: [Vec<&StatusSlot>; 3] = Default::default();

        for slot in self.slots.values().filter(|s| s.visible && !s.content.is_empty()) {
            let index = match slot.alignment {
                SlotAlignment::Left => 0,
                SlotAlignment::Center => 1,
                SlotAlignment::Right => 2,
            };
            groups[index].push(slot);
        }

        // Higher priority first, id as a stable tie-break
        for group in groups.iter_mut() {
            group.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        }
        groups
    }

    /// Create spans for a group of slots
    fn create_spans_for_slots(&self, slots: &[&StatusSlot]) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        for (i, slot) in slots.iter().enumerate() {
            if i > 0 && !self.separator.is_empty() {
                spans.push(Span::styled(self.separator.clone(), self.background_style));
            }
            let style = slot.style.unwrap_or(self.background_style);
            spans.push(Span::styled(slot.display_text(), style));
        }

        spans
    }

    /// Calculate the width needed for a group of spans
    fn calculate_spans_width(spans: &[Span]) -> u16 {
        spans.iter().map(|span| span.width() as u16).sum()
    }

    fn padding(&self, width: u16) -> Span<'static> {
        Span::styled(" ".repeat(width as usize), self.background_style)
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        buf.set_style(area, self.background_style);
        if area.width == 0 {
            return;
        }

        let [left_slots, center_slots, right_slots] = self.get_organized_slots();

        let mut left_spans = vec![Span::styled(" ", self.background_style)];
        left_spans.extend(self.create_spans_for_slots(&left_slots));
        let center_spans = self.create_spans_for_slots(&center_slots);
        let mut right_spans = self.create_spans_for_slots(&right_slots);
        right_spans.push(Span::styled(" ", self.background_style));

        let left_width = Self::calculate_spans_width(&left_spans);
        let center_width = Self::calculate_spans_width(&center_spans);
        let right_width = Self::calculate_spans_width(&right_spans);
        let available_width = area.width;

        let mut all_spans = Vec::new();
        if left_width + center_width + right_width <= available_width {
            let remaining_width = available_width - left_width - right_width;
            let center_padding = (remaining_width - center_width) / 2;

            all_spans.extend(left_spans);
            all_spans.push(self.padding(center_padding));
            all_spans.extend(center_spans);
            all_spans.push(self.padding(remaining_width - center_width - center_padding));
            all_spans.extend(right_spans);
        } else {
            // Not enough space: left content first, then right, center dropped
            let mut used_width = 0u16;
            for span in left_spans {
                let span_width = span.width() as u16;
                if used_width + span_width > available_width {
                    break;
                }
                used_width += span_width;
                all_spans.push(span);
            }

            let mut right_spans_to_add = Vec::new();
            for span in right_spans.into_iter().rev() {
                let span_width = span.width() as u16;
                if used_width + span_width > available_width {
                    break;
                }
                used_width += span_width;
                right_spans_to_add.push(span);
            }
            right_spans_to_add.reverse();

            all_spans.push(self.padding(available_width - used_width));
            all_spans.extend(right_spans_to_add);
        }

        Paragraph::new(Line::from(all_spans))
            .style(self.background_style)
            .render(area, buf);
    }
}
