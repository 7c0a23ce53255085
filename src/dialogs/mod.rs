//! # Dialog boundary
//!
//! Command handlers never talk to the terminal directly. Every question they
//! ask the user goes through [`Dialogs`], which returns a plain value or
//! `None` when the user cancelled. [`TerminalDialogs`] implements it with
//! blocking modal widgets; tests substitute scripted answers.

pub mod file_picker;
pub mod prompt;
pub mod terminal;

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::presentation::Rgb;

pub use file_picker::{FileFilter, FilePicker, PickerMode};
pub use prompt::{AlertDialog, ColorPrompt, DialogStep, DialogWidget, IntegerPrompt, TextPrompt};
pub use terminal::TerminalDialogs;

/// Severity of a modal alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// Blocking user prompts used by command handlers.
///
/// `Ok(None)` always means the user cancelled; `Err` is reserved for
/// failures of the dialog surface itself.
pub trait Dialogs {
    /// Ask for an existing file to open
    fn open_file(&mut self, start_dir: &Path) -> Result<Option<PathBuf>>;

    /// Ask for a destination to save to
    fn save_file(&mut self, start_dir: &Path, suggested_name: &str) -> Result<Option<PathBuf>>;

    /// Ask for a line of text
    fn prompt_text(&mut self, title: &str, prompt: &str, initial: &str) -> Result<Option<String>>;

    /// Ask for an integer; values outside `bounds` are rejected by the prompt
    fn prompt_integer(
        &mut self,
        title: &str,
        prompt: &str,
        initial: i64,
        bounds: RangeInclusive<i64>,
    ) -> Result<Option<i64>>;

    /// Ask for a color
    fn pick_color(&mut self, title: &str, initial: Rgb) -> Result<Option<Rgb>>;

    /// Show a message and wait until it is dismissed
    fn alert(&mut self, kind: AlertKind, title: &str, message: &str) -> Result<()>;
}
