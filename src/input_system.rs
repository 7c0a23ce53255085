use crate::events::{AppEvent, EventSender};
use anyhow::{Context, Result};
use ratatui::crossterm::event::{Event, KeyEvent, KeyEventKind, MouseEvent};

/// Input system that turns raw terminal input into published events
pub struct InputSystem {
    event_sender: EventSender,
}

impl InputSystem {
    /// Create a new input system
    pub fn new(event_sender: EventSender) -> Self {
        Self { event_sender }
    }

    /// Route one terminal event
    pub fn handle_event(&self, event: Event) -> Result<()> {
        match event {
            // Key release and repeat reports are dropped
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key_input(key),
            Event::Mouse(mouse) => self.handle_mouse_input(mouse),
            Event::Resize(width, height) => self.handle_resize(width, height),
            _ => Ok(()),
        }
    }

    /// Handle keyboard input by publishing a key event
    pub fn handle_key_input(&self, key: KeyEvent) -> Result<()> {
        self.event_sender
            .send(AppEvent::KeyInput(key))
            .context("Failed to publish key input event")
    }

    /// Handle mouse input by publishing a mouse event
    pub fn handle_mouse_input(&self, mouse: MouseEvent) -> Result<()> {
        self.event_sender
            .send(AppEvent::MouseInput(mouse))
            .context("Failed to publish mouse input event")
    }

    pub fn handle_resize(&self, width: u16, height: u16) -> Result<()> {
        self.event_sender
            .send(AppEvent::Resize { width, height })
            .context("Failed to publish resize event")
    }
}
