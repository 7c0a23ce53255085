/// Application state handlers that respond to events
use crate::events::AppEvent;
use crate::widgets::toast::Toast;
use crate::App;
use anyhow::Result;
use tracing::debug;

/// App state handler that manages application state in response to events
#[derive(Debug, Clone, Default)]
pub struct AppStateHandler;

impl AppStateHandler {
    /// Create a new app state handler
    pub fn new() -> Self {
        Self
    }

    /// Apply a state event; input and command events are ignored here
    pub fn handle_event(&self, app: &mut App, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::StatusMessage { message } => self.handle_status_message(app, &message),
            AppEvent::ToastMessage {
                message,
                toast_type,
            } => {
                app.toast_manager
                    .add_toast(Toast::new(message.to_string(), toast_type));
            }
            AppEvent::Resize { width, height } => self.handle_resize(app, width, height),
            AppEvent::Quit => app.running = false,
            AppEvent::KeyInput(_) | AppEvent::MouseInput(_) | AppEvent::Command(_) => {}
        }

        Ok(())
    }

    /// Handle status message events
    fn handle_status_message(&self, app: &mut App, message: &str) {
        app.set_status_message(message);
    }

    /// The next frame recomputes the layout; the menu would hang in the
    /// wrong place until then
    fn handle_resize(&self, app: &mut App, width: u16, height: u16) {
        debug!(width, height, "Terminal resized");
        app.menu.close();
        app.ensure_cursor_visible();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::Clipboard;
    use crate::config::Config;
    use crate::widgets::ToastType;

    #[test]
    fn test_quit_stops_the_app() {
        let mut app = App::new(&Config::default(), Clipboard::in_memory());
        AppStateHandler::new()
            .handle_event(&mut app, AppEvent::Quit)
            .unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_toast_and_status_messages() {
        let mut app = App::new(&Config::default(), Clipboard::in_memory());
        let handler = AppStateHandler::new();
        handler
            .handle_event(
                &mut app,
                AppEvent::ToastMessage {
                    message: "Saved".into(),
                    toast_type: ToastType::Success,
                },
            )
            .unwrap();
        handler
            .handle_event(
                &mut app,
                AppEvent::StatusMessage {
                    message: "Ready".into(),
                },
            )
            .unwrap();

        assert_eq!(app.toast_manager.toasts().len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Ready"));
    }
}
