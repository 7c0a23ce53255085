//! Integration tests for the status bar widget
//!
//! Tests the slot-based status bar and the slots the editor fills in

use jotpad::clipboard::Clipboard;
use jotpad::config::Config;
use jotpad::widgets::{SlotAlignment, StatusBar, StatusSlot};
use jotpad::App;
use ratatui::{
    backend::TestBackend,
    layout::Rect,
    style::{Color, Style},
    Terminal,
};

fn render(status_bar: &StatusBar, width: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(status_bar.clone(), Rect::new(0, 0, width, 1)))
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..width)
        .map(|x| buffer.cell((x, 0)).map_or(" ", |c| c.symbol()))
        .collect()
}

#[test]
fn test_status_slot_creation() {
    let slot = StatusSlot::new("test", "Test Content")
        .with_alignment(SlotAlignment::Right)
        .with_priority(90)
        .with_style(Style::default().fg(Color::Red))
        .with_visibility(false)
        .with_max_width(20);

    assert_eq!(slot.id, "test");
    assert_eq!(slot.content, "Test Content");
    assert_eq!(slot.alignment, SlotAlignment::Right);
    assert_eq!(slot.priority, 90);
    assert_eq!(slot.style, Some(Style::default().fg(Color::Red)));
    assert_eq!(slot.max_width, Some(20));
    assert!(!slot.visible);
}

#[test]
fn test_status_bar_slot_management() {
    let mut status_bar = StatusBar::new();

    status_bar.set_slot(StatusSlot::new("file", "notes.txt"));
    status_bar.set_slot(StatusSlot::new("cursor", "Ln 1, Col 1"));

    assert!(status_bar.slot("file").is_some());
    assert!(status_bar.slot("nonexistent").is_none());

    status_bar.remove_slot("cursor");
    assert!(status_bar.slot("cursor").is_none());

    // Updating a missing slot is a no-op
    status_bar.update_slot_content("nonexistent", "value");
    status_bar.update_slot_content("file", "other.txt");
    assert_eq!(status_bar.slot("file").unwrap().content, "other.txt");
}

#[test]
fn test_status_bar_slot_visibility() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("test", "Visible text"));

    status_bar.hide_slot("test");
    assert!(!status_bar.slot("test").unwrap().visible);
    assert!(!render(&status_bar, 40).contains("Visible text"));

    status_bar.show_slot("test");
    assert!(render(&status_bar, 40).contains("Visible text"));
}

#[test]
fn test_status_bar_orders_by_priority() {
    let mut status_bar = StatusBar::new().with_separator(" | ");

    status_bar.set_slot(
        StatusSlot::new("low", "Low")
            .with_alignment(SlotAlignment::Left)
            .with_priority(50),
    );
    status_bar.set_slot(
        StatusSlot::new("high", "High")
            .with_alignment(SlotAlignment::Left)
            .with_priority(100),
    );
    status_bar.set_slot(
        StatusSlot::new("medium", "Medium")
            .with_alignment(SlotAlignment::Left)
            .with_priority(75),
    );

    assert!(render(&status_bar, 40).starts_with(" High | Medium | Low"));
}

#[test]
fn test_status_bar_alignment_groups() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("left", "L").with_alignment(SlotAlignment::Left));
    status_bar.set_slot(StatusSlot::new("center", "C").with_alignment(SlotAlignment::Center));
    status_bar.set_slot(StatusSlot::new("right", "R").with_alignment(SlotAlignment::Right));

    let line = render(&status_bar, 21);
    assert_eq!(line.find('L'), Some(1));
    assert_eq!(line.find('C'), Some(10));
    assert_eq!(line.find('R'), Some(19));
}

#[test]
fn test_empty_slots_are_skipped() {
    let mut status_bar = StatusBar::new().with_separator(" | ");
    status_bar.set_slot(StatusSlot::new("a", "A").with_priority(90));
    status_bar.set_slot(StatusSlot::new("b", "").with_priority(80));
    status_bar.set_slot(StatusSlot::new("c", "C").with_priority(70));

    assert!(render(&status_bar, 20).starts_with(" A | C "));
}

#[test]
fn test_max_width_truncates() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(StatusSlot::new("file", "a-very-long-file-name.txt").with_max_width(10));
    assert!(render(&status_bar, 40).starts_with(" a-very-..."));
}

#[test]
fn test_editor_status_reflects_document() {
    let mut app = App::new(&Config::default(), Clipboard::in_memory());
    app.session.edit(|buffer| buffer.set_text("one\ntwo"));
    app.session.buffer.set_cursor(1, 2);
    app.update_status_bar();

    let slot = |id: &str| app.status_bar.slot(id).map(|s| s.content.clone());
    assert_eq!(slot("file").as_deref(), Some("Untitled"));
    assert_eq!(slot("cursor").as_deref(), Some("Ln 2, Col 3"));
    assert_eq!(slot("modified").as_deref(), Some("Modified"));
    assert_eq!(slot("font").as_deref(), Some("Consolas 11pt"));
    assert_eq!(slot("wrap").as_deref(), Some("Wrap"));
    assert_eq!(slot("theme").as_deref(), Some("Light"));
    assert!(!app.status_bar.slot("selection").unwrap().visible);
}

#[test]
fn test_editor_status_shows_selection_size() {
    let mut app = App::new(&Config::default(), Clipboard::in_memory());
    app.session.edit(|buffer| buffer.set_text("ab\ncd"));
    app.session.select_all();
    app.update_status_bar();

    let selection = app.status_bar.slot("selection").unwrap();
    assert!(selection.visible);
    assert_eq!(selection.content, "Selection: 2 lines, 5 chars");
    assert!(!app.status_bar.slot("message").unwrap().visible);
}
