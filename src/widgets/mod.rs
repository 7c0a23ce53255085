pub mod cursor;
pub mod editor;
pub mod menu_bar;
pub mod modal;
pub mod status_bar;
pub mod toast;

pub use cursor::{Cursor, CursorState};
pub use editor::Editor;
pub use menu_bar::{MenuBar, MenuDropdown, MenuState};
pub use modal::Modal;
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
pub use toast::{Toast, ToastManager, ToastType, ToastWidget};
