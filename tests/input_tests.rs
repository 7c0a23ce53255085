//! Integration tests for input handling and keyboard operations
//!
//! Tests the input system, the key and mouse handlers and screen mapping

use jotpad::clipboard::Clipboard;
use jotpad::commands::{Command, Menu};
use jotpad::config::Config;
use jotpad::events::{AppEvent, EventBus};
use jotpad::handlers::{KeyboardHandler, MouseHandler};
use jotpad::input::coordinates::{buffer_to_screen_coords, screen_to_buffer_coords};
use jotpad::input_system::InputSystem;
use jotpad::App;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::Terminal;

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// App drawn once into an 40x10 terminal: menu row 0, text rows 1..9
fn drawn_app(text: &str) -> App {
    let mut app = App::new(&Config::default(), Clipboard::in_memory());
    app.session.edit(|buffer| buffer.set_text(text));
    app.session.buffer.set_cursor(0, 0);
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    app.draw(&mut terminal).unwrap();
    app
}

#[test]
fn test_input_system_publishes_presses_only() {
    let mut event_bus = EventBus::new();
    let input_system = InputSystem::new(event_bus.sender());

    let press = key(KeyCode::Char('a'), KeyModifiers::NONE);
    let release = KeyEvent {
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
        ..press
    };

    input_system.handle_event(Event::Key(press)).unwrap();
    input_system.handle_event(Event::Key(release)).unwrap();
    input_system.handle_event(Event::Resize(80, 24)).unwrap();

    assert!(matches!(event_bus.try_next(), Some(AppEvent::KeyInput(k)) if k == press));
    assert!(matches!(
        event_bus.try_next(),
        Some(AppEvent::Resize {
            width: 80,
            height: 24
        })
    ));
    assert!(event_bus.try_next().is_none());
}

#[test]
fn test_mouse_event_processing() {
    let mut event_bus = EventBus::new();
    let input_system = InputSystem::new(event_bus.sender());

    let event = mouse(MouseEventKind::Down(MouseButton::Left), 10, 5);
    input_system.handle_mouse_input(event).unwrap();
    assert!(matches!(event_bus.try_next(), Some(AppEvent::MouseInput(m)) if m == event));
}

#[test]
fn test_shift_arrows_extend_selection() {
    let mut app = drawn_app("hello world");
    let handler = KeyboardHandler::new(app.event_bus.sender());

    for _ in 0..5 {
        handler
            .handle_key_event(&mut app, key(KeyCode::Right, KeyModifiers::SHIFT))
            .unwrap();
    }
    assert_eq!(app.session.buffer.get_selected_text().as_deref(), Some("hello"));

    // A plain arrow drops the selection
    handler
        .handle_key_event(&mut app, key(KeyCode::Right, KeyModifiers::NONE))
        .unwrap();
    assert!(app.session.buffer.get_selection_range().is_none());
    assert_eq!(app.session.buffer.cursor_pos, (0, 6));
}

#[test]
fn test_backspace_removes_selection() {
    let mut app = drawn_app("abc");
    let handler = KeyboardHandler::new(app.event_bus.sender());
    app.session.select_all();

    handler
        .handle_key_event(&mut app, key(KeyCode::Backspace, KeyModifiers::NONE))
        .unwrap();
    assert_eq!(app.session.buffer.content_as_string(), "");
}

#[test]
fn test_page_down_keeps_caret_visible() {
    let text: Vec<String> = (0..50).map(|i| i.to_string()).collect();
    let mut app = drawn_app(&text.join("\n"));
    let handler = KeyboardHandler::new(app.event_bus.sender());

    handler
        .handle_key_event(&mut app, key(KeyCode::PageDown, KeyModifiers::NONE))
        .unwrap();
    handler
        .handle_key_event(&mut app, key(KeyCode::PageDown, KeyModifiers::NONE))
        .unwrap();

    let (row, _) = app.session.buffer.cursor_pos;
    assert_eq!(row, 16);
    assert!(app.scroll_offset.0 <= row);
    assert!(row < app.scroll_offset.0 + app.text_area.height as usize);
}

#[test]
fn test_ctrl_end_in_long_wrapped_file_reaches_last_line() {
    let text: Vec<String> = (0..20_000).map(|i| format!("line {}", i)).collect();
    let mut app = drawn_app(&text.join("\n"));
    let handler = KeyboardHandler::new(app.event_bus.sender());
    assert!(app.session.presentation.wrap.is_enabled());

    handler
        .handle_key_event(&mut app, key(KeyCode::End, KeyModifiers::CONTROL))
        .unwrap();

    let height = app.text_area.height as usize;
    assert_eq!(app.session.buffer.cursor_pos.0, 19_999);
    assert_eq!(app.scroll_offset.0, 20_000 - height);
    assert!(buffer_to_screen_coords(&app, 19_999, 10).is_some());

    // Back to the top
    handler
        .handle_key_event(&mut app, key(KeyCode::Home, KeyModifiers::CONTROL))
        .unwrap();
    assert_eq!(app.scroll_offset.0, 0);
}

#[test]
fn test_wrapped_rows_above_caret_count_toward_scroll() {
    // 40 columns minus a 4-cell gutter leaves 36; every line wraps onto two rows
    let long = "word ".repeat(10);
    let text: Vec<String> = (0..20).map(|_| long.clone()).collect();
    let mut app = drawn_app(&text.join("\n"));
    let height = app.text_area.height as usize;

    app.session.buffer.set_cursor(19, 0);
    app.ensure_cursor_visible();

    // Caret row takes one screen row; each earlier line takes two
    assert_eq!(app.scroll_offset.0, 20 - (height + 1) / 2);
    assert!(buffer_to_screen_coords(&app, 19, 0).is_some());
}

#[test]
fn test_click_after_wide_characters_maps_to_char_column() {
    let mut app = drawn_app("日本語 text");
    let handler = MouseHandler::new(app.event_bus.sender());
    let x0 = app.text_area.x;
    let y0 = app.text_area.y;

    // Three two-cell ideographs and a space occupy cells 0..7
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x0 + 7, y0))
        .unwrap();
    assert_eq!(app.session.buffer.cursor_pos, (0, 4));
    assert_eq!(buffer_to_screen_coords(&app, 0, 4), Some((x0 + 7, y0)));

    // The right half of an ideograph selects the ideograph itself
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x0 + 3, y0))
        .unwrap();
    assert_eq!(app.session.buffer.cursor_pos, (0, 1));
}

#[test]
fn test_f10_opens_file_menu_and_escape_closes() {
    let mut app = drawn_app("");
    let handler = KeyboardHandler::new(app.event_bus.sender());

    handler
        .handle_key_event(&mut app, key(KeyCode::F(10), KeyModifiers::NONE))
        .unwrap();
    assert_eq!(app.menu.current(), Some(Menu::File));

    handler
        .handle_key_event(&mut app, key(KeyCode::Right, KeyModifiers::NONE))
        .unwrap();
    assert_eq!(app.menu.current(), Some(Menu::Edit));

    handler
        .handle_key_event(&mut app, key(KeyCode::Esc, KeyModifiers::NONE))
        .unwrap();
    assert!(!app.menu.is_open());
}

#[test]
fn test_click_positions_caret_and_drag_selects() {
    let mut app = drawn_app("hello world\nsecond line");
    let handler = MouseHandler::new(app.event_bus.sender());
    let x0 = app.text_area.x;
    let y0 = app.text_area.y;

    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), x0 + 6, y0))
        .unwrap();
    assert_eq!(app.session.buffer.cursor_pos, (0, 6));

    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), x0 + 6, y0 + 1))
        .unwrap();
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), x0 + 6, y0 + 1))
        .unwrap();

    assert_eq!(
        app.session.buffer.get_selected_text().as_deref(),
        Some("world\nsecond")
    );
    assert!(app.mouse_drag_start.is_none());
}

#[test]
fn test_menu_click_runs_command() {
    let mut app = drawn_app("");
    let handler = MouseHandler::new(app.event_bus.sender());

    // "Help" title sits after " File  Edit  Format "
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 22, 0))
        .unwrap();
    assert_eq!(app.menu.current(), Some(Menu::Help));

    // The drop-down hangs below its title; its first entry is one row under the border
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 24, 2))
        .unwrap();
    assert!(!app.menu.is_open());
    assert!(matches!(
        app.event_bus.try_next(),
        Some(AppEvent::Command(Command::About))
    ));
}

#[test]
fn test_wheel_scrolls_without_moving_caret() {
    let text: Vec<String> = (0..30).map(|i| i.to_string()).collect();
    let mut app = drawn_app(&text.join("\n"));
    let handler = MouseHandler::new(app.event_bus.sender());

    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollDown, 5, 5))
        .unwrap();
    assert_eq!(app.scroll_offset.0, 3);
    assert_eq!(app.session.buffer.cursor_pos, (0, 0));

    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollUp, 5, 5))
        .unwrap();
    assert_eq!(app.scroll_offset.0, 0);
}

#[test]
fn test_horizontal_wheel_only_scrolls_unwrapped_text() {
    let mut app = drawn_app(&"x".repeat(60));
    let handler = MouseHandler::new(app.event_bus.sender());

    // Word wrap is on by default, so there is nothing to scroll sideways
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollRight, 5, 5))
        .unwrap();
    assert_eq!(app.scroll_offset.1, 0);

    app.session.toggle_word_wrap();
    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollRight, 5, 5))
        .unwrap();
    assert_eq!(app.scroll_offset.1, 3);

    handler
        .handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollLeft, 5, 5))
        .unwrap();
    assert_eq!(app.scroll_offset.1, 0);
}

#[test]
fn test_screen_and_buffer_coordinates_agree() {
    let app = drawn_app("short\nanother line");
    let (x, y) = buffer_to_screen_coords(&app, 1, 3).unwrap();
    assert_eq!(screen_to_buffer_coords(&app, x, y), Some((1, 3)));

    // Clicking past the last line lands at the end of the buffer
    let below = app.text_area.y + 5;
    assert_eq!(screen_to_buffer_coords(&app, app.text_area.x, below), Some((1, 12)));

    // The menu row is outside the editor
    assert_eq!(screen_to_buffer_coords(&app, 5, 0), None);
}
