use anyhow::{anyhow, Result};
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::commands::Command;
use crate::widgets::toast::ToastType;

/// All possible events in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input events
    KeyInput(KeyEvent),

    /// Mouse input events
    MouseInput(MouseEvent),

    /// Terminal resized
    Resize { width: u16, height: u16 },

    /// Run a command from the menu or a shortcut
    Command(Command),

    /// UI events
    StatusMessage {
        message: Arc<str>,
    },
    ToastMessage {
        message: Arc<str>,
        toast_type: ToastType,
    },

    /// Application lifecycle
    Quit,
}

impl AppEvent {
    /// Short name used in logs
    pub fn event_type(&self) -> &'static str {
        match self {
            AppEvent::KeyInput(_) => "key_input",
            AppEvent::MouseInput(_) => "mouse_input",
            AppEvent::Resize { .. } => "resize",
            AppEvent::Command(_) => "command",
            AppEvent::StatusMessage { .. } => "status_message",
            AppEvent::ToastMessage { .. } => "toast_message",
            AppEvent::Quit => "quit",
        }
    }
}

/// Sending half handed to input sources and handlers
pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Queue of pending events, drained by the main loop between frames
pub struct EventBus {
    /// Channel for sending events
    sender: EventSender,

    /// Channel for receiving events
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender for publishing events
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Publish an event
    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|e| anyhow!("Failed to publish {} event", e.0.event_type()))
    }

    /// Next pending event, if any
    pub fn try_next(&mut self) -> Option<AppEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}
