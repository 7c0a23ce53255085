//! Clipboard access for Cut / Copy / Paste.
//!
//! Talks to the system clipboard through the `clipboard` crate and falls
//! back to an in-process register when no system clipboard is reachable
//! (for example over SSH or in tests).

use clipboard::{ClipboardContext, ClipboardProvider};
use tracing::{debug, warn};

pub struct Clipboard {
    system: Option<ClipboardContext>,
    register: String,
}

impl Clipboard {
    /// Use the system clipboard when available
    pub fn system() -> Self {
        let system = match ClipboardContext::new() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                warn!("System clipboard unavailable, using internal register: {}", e);
                None
            }
        };

        Self {
            system,
            register: String::new(),
        }
    }

    /// Keep clipboard contents inside the process only
    pub fn in_memory() -> Self {
        Self {
            system: None,
            register: String::new(),
        }
    }

    pub fn is_system(&self) -> bool {
        self.system.is_some()
    }

    pub fn set_text(&mut self, text: String) {
        if let Some(ctx) = self.system.as_mut() {
            if let Err(e) = ctx.set_contents(text.clone()) {
                debug!("System clipboard write failed: {}", e);
            }
        }
        self.register = text;
    }

    pub fn get_text(&mut self) -> String {
        if let Some(ctx) = self.system.as_mut() {
            match ctx.get_contents() {
                Ok(text) => return text,
                Err(e) => debug!("System clipboard read failed: {}", e),
            }
        }
        self.register.clone()
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("system", &self.system.is_some())
            .field("register_len", &self.register.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let mut clipboard = Clipboard::in_memory();
        assert_eq!(clipboard.get_text(), "");
        clipboard.set_text("hello".to_string());
        assert_eq!(clipboard.get_text(), "hello");
        assert!(!clipboard.is_system());
    }
}
