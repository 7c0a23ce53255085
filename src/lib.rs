//! Jotpad library: the editor core, its widgets and the terminal front end

pub mod app;
pub mod buffer;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod line_numbers;
pub mod presentation;
pub mod search;
pub mod session;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::App;
pub use buffer::Buffer;
pub use session::EditorSession;
