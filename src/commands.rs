//! Command table: every user action with its menu, label and shortcut.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Every action the editor can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Find,
    Replace,
    FontStyle,
    FontSize,
    FontColor,
    ToggleWordWrap,
    ToggleLineNumbers,
    ToggleDarkMode,
    About,
}

/// Top-level menus in menu bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
    Format,
    Help,
}

impl Menu {
    pub const ALL: [Menu; 4] = [Menu::File, Menu::Edit, Menu::Format, Menu::Help];

    pub fn title(self) -> &'static str {
        match self {
            Menu::File => "File",
            Menu::Edit => "Edit",
            Menu::Format => "Format",
            Menu::Help => "Help",
        }
    }

    /// Letter that opens the menu together with Alt
    pub fn mnemonic(self) -> char {
        match self {
            Menu::File => 'f',
            Menu::Edit => 'e',
            Menu::Format => 'o',
            Menu::Help => 'h',
        }
    }

    /// Entries of the menu, `None` marking a separator
    pub fn entries(self) -> &'static [Option<Command>] {
        match self {
            Menu::File => &[
                Some(Command::New),
                Some(Command::Open),
                Some(Command::Save),
                Some(Command::SaveAs),
                None,
                Some(Command::Exit),
            ],
            Menu::Edit => &[
                Some(Command::Cut),
                Some(Command::Copy),
                Some(Command::Paste),
                None,
                Some(Command::SelectAll),
                Some(Command::Find),
                Some(Command::Replace),
            ],
            Menu::Format => &[
                Some(Command::FontStyle),
                Some(Command::FontSize),
                Some(Command::FontColor),
                None,
                Some(Command::ToggleWordWrap),
                Some(Command::ToggleLineNumbers),
                Some(Command::ToggleDarkMode),
            ],
            Menu::Help => &[Some(Command::About)],
        }
    }

    /// Commands of the menu without separators
    pub fn commands(self) -> impl Iterator<Item = Command> {
        self.entries().iter().flatten().copied()
    }

    pub fn from_mnemonic(c: char) -> Option<Menu> {
        let c = c.to_ascii_lowercase();
        Menu::ALL.into_iter().find(|menu| menu.mnemonic() == c)
    }
}

impl Command {
    pub const ALL: [Command; 18] = [
        Command::New,
        Command::Open,
        Command::Save,
        Command::SaveAs,
        Command::Exit,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::Find,
        Command::Replace,
        Command::FontStyle,
        Command::FontSize,
        Command::FontColor,
        Command::ToggleWordWrap,
        Command::ToggleLineNumbers,
        Command::ToggleDarkMode,
        Command::About,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open => "Open...",
            Command::Save => "Save",
            Command::SaveAs => "Save As...",
            Command::Exit => "Exit",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::Find => "Find...",
            Command::Replace => "Replace...",
            Command::FontStyle => "Font Style...",
            Command::FontSize => "Font Size...",
            Command::FontColor => "Font Color...",
            Command::ToggleWordWrap => "Word Wrap",
            Command::ToggleLineNumbers => "Line Numbers",
            Command::ToggleDarkMode => "Dark Mode",
            Command::About => "About",
        }
    }

    /// Human readable shortcut shown in menus
    pub fn shortcut(self) -> Option<&'static str> {
        match self {
            Command::New => Some("Ctrl+N"),
            Command::Open => Some("Ctrl+O"),
            Command::Save => Some("Ctrl+S"),
            Command::SaveAs => Some("F12"),
            Command::Exit => Some("Ctrl+Q"),
            Command::Cut => Some("Ctrl+X"),
            Command::Copy => Some("Ctrl+C"),
            Command::Paste => Some("Ctrl+V"),
            Command::SelectAll => Some("Ctrl+A"),
            Command::Find => Some("Ctrl+F"),
            Command::Replace => Some("Ctrl+R"),
            Command::ToggleWordWrap => Some("Alt+Z"),
            Command::ToggleLineNumbers => Some("Alt+L"),
            Command::ToggleDarkMode => Some("Ctrl+D"),
            Command::About => Some("F1"),
            Command::FontStyle | Command::FontSize | Command::FontColor => None,
        }
    }

    pub fn menu(self) -> Menu {
        Menu::ALL
            .into_iter()
            .find(|menu| menu.commands().any(|c| c == self))
            .unwrap_or(Menu::Help)
    }

    /// Whether the command only flips a presentation toggle
    pub fn is_toggle(self) -> bool {
        matches!(
            self,
            Command::ToggleWordWrap | Command::ToggleLineNumbers | Command::ToggleDarkMode
        )
    }

    /// Map a key press to its shortcut command
    pub fn from_key(key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::F(1) => Some(Command::About),
            KeyCode::F(12) => Some(Command::SaveAs),
            KeyCode::Char(c) if ctrl && !alt => match c.to_ascii_lowercase() {
                'n' => Some(Command::New),
                'o' => Some(Command::Open),
                's' => Some(Command::Save),
                'q' => Some(Command::Exit),
                'x' => Some(Command::Cut),
                'c' => Some(Command::Copy),
                'v' => Some(Command::Paste),
                'a' => Some(Command::SelectAll),
                'f' => Some(Command::Find),
                'r' => Some(Command::Replace),
                'd' => Some(Command::ToggleDarkMode),
                _ => None,
            },
            KeyCode::Char(c) if alt && !ctrl => match c.to_ascii_lowercase() {
                'z' => Some(Command::ToggleWordWrap),
                'l' => Some(Command::ToggleLineNumbers),
                _ => None,
            },
            _ => None,
        }
    }
}
