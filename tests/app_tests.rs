//! Integration tests for the application state and core functionality
//!
//! Tests the main App struct, command dispatch and one rendered frame

mod common;

use std::fs;
use tempfile::TempDir;

use common::{Answer, ScriptedDialogs};
use jotpad::clipboard::Clipboard;
use jotpad::commands::Command;
use jotpad::config::Config;
use jotpad::App;
use ratatui::{backend::TestBackend, Terminal};

fn app() -> App {
    App::new(&Config::default(), Clipboard::in_memory())
}

fn screen_text(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer.cell((x, y)).map_or(" ", |c| c.symbol()))
                .collect()
        })
        .collect()
}

#[test]
fn test_app_creation() {
    let app = app();

    assert!(app.running);
    assert_eq!(app.scroll_offset, (0, 0));
    assert!(app.status_message.is_none());
    assert!(app.mouse_drag_start.is_none());
    assert!(!app.menu.is_open());
    assert_eq!(app.session.title(), "Untitled - Jotpad");

    // Status bar is initialized with default slots
    assert!(app.status_bar.slot("file").is_some());
    assert!(app.status_bar.slot("cursor").is_some());
}

#[test]
fn test_app_with_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    fs::write(&file_path, "Hello World\nSecond Line").unwrap();

    let app = App::with_file(&Config::default(), Clipboard::in_memory(), &file_path).unwrap();

    let buffer = &app.session.buffer;
    assert_eq!(buffer.name, "test.txt");
    assert_eq!(buffer.content, vec!["Hello World", "Second Line"]);
    assert!(!buffer.modified);
    assert_eq!(app.session.line_numbers.label_count(), 2);
}

#[test]
fn test_app_with_new_file_path() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("fresh.txt");

    let mut app = App::with_file(&Config::default(), Clipboard::in_memory(), &file_path).unwrap();
    assert_eq!(app.session.buffer.name, "fresh.txt");
    assert!(!file_path.exists());

    // Save goes straight to the given path
    app.session.edit(|buffer| buffer.insert_str("hi"));
    let mut dialogs = ScriptedDialogs::new();
    app.run_command(Command::Save, &mut dialogs).unwrap();
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "hi");
    assert!(dialogs.asked.is_empty());
}

#[test]
fn test_with_unreadable_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("bad.txt");
    fs::write(&file_path, [0xc3, 0x28]).unwrap();

    let result = App::with_file(&Config::default(), Clipboard::in_memory(), &file_path);
    assert!(result.is_err());
}

#[test]
fn test_exit_command_stops_app() {
    let mut app = app();
    app.run_command(Command::Exit, &mut ScriptedDialogs::new())
        .unwrap();
    assert!(!app.running);
}

#[test]
fn test_command_notices_become_toasts() {
    let mut app = app();
    app.run_command(Command::ToggleWordWrap, &mut ScriptedDialogs::new())
        .unwrap();

    assert_eq!(app.toast_manager.toasts().len(), 1);
    assert_eq!(app.status_message.as_deref(), Some("Word wrap off"));
}

#[test]
fn test_render_shows_menu_text_and_status() {
    let mut app = app();
    app.session.edit(|buffer| buffer.set_text("first line\nsecond"));

    let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
    app.draw(&mut terminal).unwrap();
    let lines = screen_text(&terminal);

    assert!(lines[0].starts_with("  File  Edit  Format  Help"));
    assert!(lines[0].contains("Untitled - Jotpad"));
    assert!(lines[1].starts_with("  1 first line"));
    assert!(lines[2].starts_with("  2 second"));
    assert!(lines[7].contains("Ln 1, Col 1"));
    assert!(lines[7].contains("Wrap"));

    // The last frame is kept for dialogs to draw over
    assert_eq!(app.backdrop.area, terminal.backend().buffer().area);
    assert_eq!(app.text_area.x, 4);
    assert_eq!(app.text_area.height, 6);
}

#[test]
fn test_hidden_line_numbers_give_text_full_width() {
    let mut app = app();
    app.run_command(Command::ToggleLineNumbers, &mut ScriptedDialogs::new())
        .unwrap();

    let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    app.draw(&mut terminal).unwrap();
    assert_eq!(app.text_area.x, 0);
    assert_eq!(app.text_area.width, 40);
}

#[test]
fn test_open_via_app_resets_scroll() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("long.txt");
    let text: Vec<String> = (0..100).map(|i| format!("line {}", i)).collect();
    fs::write(&path, text.join("\n")).unwrap();

    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    app.draw(&mut terminal).unwrap();

    let mut dialogs = ScriptedDialogs::with([Answer::File(Some(path))]);
    app.run_command(Command::Open, &mut dialogs).unwrap();
    app.session.buffer.set_cursor(99, 0);
    app.ensure_cursor_visible();
    assert!(app.scroll_offset.0 > 0);

    app.run_command(Command::New, &mut ScriptedDialogs::new())
        .unwrap();
    assert_eq!(app.scroll_offset, (0, 0));
}
