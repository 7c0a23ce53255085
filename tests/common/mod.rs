//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Result;
use jotpad::clipboard::Clipboard;
use jotpad::dialogs::{AlertKind, Dialogs};
use jotpad::presentation::{PresentationState, Rgb};
use jotpad::EditorSession;

/// One queued reply; `None` inside a variant means the user cancelled
#[derive(Debug, Clone)]
pub enum Answer {
    File(Option<PathBuf>),
    Text(Option<String>),
    Integer(Option<i64>),
    Color(Option<Rgb>),
}

/// Dialogs that replay queued answers and record every alert
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    answers: VecDeque<Answer>,
    pub alerts: Vec<(AlertKind, String, String)>,
    pub asked: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, answer: Answer) {
        self.answers.push_back(answer);
    }

    pub fn is_drained(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(|(_, _, message)| message.as_str())
    }

    fn next(&mut self, asked: &str) -> Answer {
        self.asked.push(asked.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for {}", asked))
    }
}

impl Dialogs for ScriptedDialogs {
    fn open_file(&mut self, _start_dir: &Path) -> Result<Option<PathBuf>> {
        match self.next("open_file") {
            Answer::File(path) => Ok(path),
            other => panic!("open_file got {:?}", other),
        }
    }

    fn save_file(&mut self, _start_dir: &Path, _suggested_name: &str) -> Result<Option<PathBuf>> {
        match self.next("save_file") {
            Answer::File(path) => Ok(path),
            other => panic!("save_file got {:?}", other),
        }
    }

    fn prompt_text(&mut self, _title: &str, prompt: &str, _initial: &str) -> Result<Option<String>> {
        match self.next(prompt) {
            Answer::Text(text) => Ok(text),
            other => panic!("prompt_text got {:?}", other),
        }
    }

    fn prompt_integer(
        &mut self,
        _title: &str,
        prompt: &str,
        _initial: i64,
        _bounds: RangeInclusive<i64>,
    ) -> Result<Option<i64>> {
        match self.next(prompt) {
            Answer::Integer(value) => Ok(value),
            other => panic!("prompt_integer got {:?}", other),
        }
    }

    fn pick_color(&mut self, _title: &str, _initial: Rgb) -> Result<Option<Rgb>> {
        match self.next("pick_color") {
            Answer::Color(color) => Ok(color),
            other => panic!("pick_color got {:?}", other),
        }
    }

    fn alert(&mut self, kind: AlertKind, title: &str, message: &str) -> Result<()> {
        self.alerts
            .push((kind, title.to_string(), message.to_string()));
        Ok(())
    }
}

pub fn session() -> EditorSession {
    EditorSession::new(PresentationState::default(), Clipboard::in_memory())
}

pub fn session_with(text: &str) -> EditorSession {
    let mut session = session();
    session.edit(|buffer| buffer.set_text(text));
    session
}
