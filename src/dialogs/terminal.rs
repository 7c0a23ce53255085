use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ratatui::{
    backend::Backend,
    buffer::Buffer as TuiBuffer,
    crossterm::event::{self, Event, KeyEventKind},
    Terminal,
};
use tracing::debug;

use crate::dialogs::{
    AlertDialog, AlertKind, ColorPrompt, DialogStep, DialogWidget, Dialogs, FilePicker,
    IntegerPrompt, TextPrompt,
};
use crate::presentation::Rgb;

/// Runs each dialog as a blocking modal on top of the last drawn frame
pub struct TerminalDialogs<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: TuiBuffer,
}

impl<'a, B: Backend> TerminalDialogs<'a, B> {
    /// `backdrop` is the editor frame the dialogs are drawn over
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: TuiBuffer) -> Self {
        Self { terminal, backdrop }
    }

    fn run<D: DialogWidget>(&mut self, mut dialog: D) -> Result<Option<D::Output>> {
        loop {
            let backdrop = &self.backdrop;
            self.terminal.draw(|f| {
                let area = f.area();
                paint_backdrop(backdrop, f.buffer_mut());
                if let Some(caret) = dialog.render(area, f.buffer_mut()) {
                    f.set_cursor_position(caret);
                }
            })?;

            // Only key presses drive dialogs; a resize just redraws
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match dialog.handle_key(key) {
                    DialogStep::Continue => {}
                    DialogStep::Submit(value) => return Ok(Some(value)),
                    DialogStep::Cancel => return Ok(None),
                }
            }
        }
    }
}

/// Copy the backdrop cells that fall inside the frame
fn paint_backdrop(backdrop: &TuiBuffer, buf: &mut TuiBuffer) {
    let area = backdrop.area.intersection(buf.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src), Some(dst)) = (backdrop.cell((x, y)), buf.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

impl<B: Backend> Dialogs for TerminalDialogs<'_, B> {
    fn open_file(&mut self, start_dir: &Path) -> Result<Option<PathBuf>> {
        debug!(dir = %start_dir.display(), "Open dialog");
        self.run(FilePicker::open(start_dir))
    }

    fn save_file(&mut self, start_dir: &Path, suggested_name: &str) -> Result<Option<PathBuf>> {
        debug!(dir = %start_dir.display(), "Save dialog");
        self.run(FilePicker::save(start_dir, suggested_name))
    }

    fn prompt_text(&mut self, title: &str, prompt: &str, initial: &str) -> Result<Option<String>> {
        self.run(TextPrompt::new(title, prompt, initial))
    }

    fn prompt_integer(
        &mut self,
        title: &str,
        prompt: &str,
        initial: i64,
        bounds: RangeInclusive<i64>,
    ) -> Result<Option<i64>> {
        self.run(IntegerPrompt::new(title, prompt, initial, bounds))
    }

    fn pick_color(&mut self, title: &str, initial: Rgb) -> Result<Option<Rgb>> {
        self.run(ColorPrompt::new(title, initial))
    }

    fn alert(&mut self, kind: AlertKind, title: &str, message: &str) -> Result<()> {
        self.run(AlertDialog::new(kind, title, message))?;
        Ok(())
    }
}
