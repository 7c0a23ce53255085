//! Menu bar across the top of the window and its drop-down menus.

use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::commands::{Command, Menu};
use crate::presentation::{PresentationState, Theme, ThemeColors};

/// Which menu is open and which entry is highlighted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<Menu>,
    selected: usize,
}

impl MenuState {
    pub fn open(&mut self, menu: Menu) {
        self.open = Some(menu);
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<Menu> {
        self.open
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Open the menu to the right, wrapping around
    pub fn next_menu(&mut self) {
        self.step_menu(1);
    }

    pub fn prev_menu(&mut self) {
        self.step_menu(Menu::ALL.len() - 1);
    }

    fn step_menu(&mut self, step: usize) {
        if let Some(menu) = self.open {
            let index = Menu::ALL.iter().position(|m| *m == menu).unwrap_or(0);
            self.open(Menu::ALL[(index + step) % Menu::ALL.len()]);
        }
    }

    /// Move the highlight by one entry, skipping separators
    pub fn move_selection(&mut self, down: bool) {
        let Some(menu) = self.open else {
            return;
        };
        let entries = menu.entries();
        let len = entries.len();
        let mut index = self.selected;
        for _ in 0..len {
            index = if down { (index + 1) % len } else { (index + len - 1) % len };
            if entries[index].is_some() {
                self.selected = index;
                return;
            }
        }
    }

    /// Highlight entry `index` if it is a command
    pub fn select(&mut self, index: usize) -> bool {
        match self.open.and_then(|menu| menu.entries().get(index).copied().flatten()) {
            Some(_) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn selected_command(&self) -> Option<Command> {
        self.open
            .and_then(|menu| menu.entries().get(self.selected).copied().flatten())
    }
}

/// Horizontal offset of each menu title inside the bar
pub fn title_offset(menu: Menu) -> u16 {
    let mut x = 1;
    for m in Menu::ALL {
        if m == menu {
            break;
        }
        x += m.title().len() as u16 + 2;
    }
    x
}

/// Menu whose title covers column `x` of the bar
pub fn menu_at(bar: Rect, x: u16) -> Option<Menu> {
    let x = x.checked_sub(bar.x)?;
    Menu::ALL.into_iter().find(|menu| {
        let start = title_offset(*menu);
        x >= start && x < start + menu.title().len() as u16 + 2
    })
}

/// Screen area of the drop-down for `menu`
pub fn dropdown_area(menu: Menu, bar: Rect, screen: Rect) -> Rect {
    let inner_width = menu
        .commands()
        .map(|c| c.label().len() + c.shortcut().map_or(0, |s| s.len() + 2))
        .max()
        .unwrap_or(0) as u16
        + 4;
    let width = (inner_width + 2).min(screen.width);
    let height = (menu.entries().len() as u16 + 2).min(screen.height.saturating_sub(bar.height));
    let x = (bar.x + title_offset(menu)).min(screen.right().saturating_sub(width));
    Rect::new(x, bar.y + 1, width, height)
}

/// Entry index under screen row `y` of an open drop-down
pub fn entry_at(menu: Menu, area: Rect, x: u16, y: u16) -> Option<usize> {
    if x <= area.x || x + 1 >= area.right() || y <= area.y || y + 1 >= area.bottom() {
        return None;
    }
    let index = (y - area.y - 1) as usize;
    (index < menu.entries().len()).then_some(index)
}

fn bar_style(colors: &ThemeColors) -> Style {
    Style::default()
        .fg(colors.window_fg.into())
        .bg(colors.window_bg.into())
}

fn highlight_style(colors: &ThemeColors) -> Style {
    Style::default()
        .fg(colors.text_bg.into())
        .bg(colors.caret.into())
        .add_modifier(Modifier::BOLD)
}

/// The bar itself: menu titles on the left, window title on the right
pub struct MenuBar<'a> {
    state: &'a MenuState,
    title: &'a str,
    colors: ThemeColors,
}

impl<'a> MenuBar<'a> {
    pub fn new(state: &'a MenuState, title: &'a str, colors: ThemeColors) -> Self {
        Self {
            state,
            title,
            colors,
        }
    }
}

impl Widget for MenuBar<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let style = bar_style(&self.colors);
        buf.set_style(area, style);

        let mut spans = vec![Span::styled(" ", style)];
        let mut used = 1;
        for menu in Menu::ALL {
            let item_style = if self.state.current() == Some(menu) {
                highlight_style(&self.colors)
            } else {
                style
            };
            // Underline the mnemonic, which is always the title's first
            // occurrence of that letter
            let title = menu.title();
            let at = title
                .to_ascii_lowercase()
                .find(menu.mnemonic())
                .unwrap_or(0);
            spans.push(Span::styled(" ", item_style));
            spans.push(Span::styled(&title[..at], item_style));
            spans.push(Span::styled(
                &title[at..at + 1],
                item_style.add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(&title[at + 1..], item_style));
            spans.push(Span::styled(" ", item_style));
            used += title.len() + 2;
        }

        let title_width = self.title.chars().count();
        let free = (area.width as usize).saturating_sub(used);
        if title_width + 2 <= free {
            spans.push(Span::styled(" ".repeat(free - title_width - 1), style));
            spans.push(Span::styled(self.title, style.add_modifier(Modifier::BOLD)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// An open drop-down menu
pub struct MenuDropdown<'a> {
    menu: Menu,
    selected: usize,
    presentation: &'a PresentationState,
}

impl<'a> MenuDropdown<'a> {
    pub fn new(state: &MenuState, presentation: &'a PresentationState) -> Option<Self> {
        Some(Self {
            menu: state.current()?,
            selected: state.selected_index(),
            presentation,
        })
    }

    fn is_checked(&self, command: Command) -> bool {
        match command {
            Command::ToggleWordWrap => self.presentation.wrap.is_enabled(),
            Command::ToggleLineNumbers => self.presentation.show_line_numbers,
            Command::ToggleDarkMode => self.presentation.theme == Theme::Dark,
            _ => false,
        }
    }
}

impl Widget for MenuDropdown<'_> {
    /// `area` is the menu bar row; the drop-down hangs below it
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let colors = self.presentation.colors();
        let style = bar_style(&colors);
        let dropdown = dropdown_area(self.menu, area, buf.area);

        Clear.render(dropdown, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .style(style);
        let inner = block.inner(dropdown);
        block.render(dropdown, buf);

        let width = inner.width as usize;
        let lines: Vec<Line> = self
            .menu
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                None => Line::from(Span::styled("─".repeat(width), style)),
                Some(command) => {
                    let mark = if command.is_toggle() && self.is_checked(*command) {
                        "✓ "
                    } else {
                        "  "
                    };
                    let label = format!("{}{}", mark, command.label());
                    let shortcut = command.shortcut().unwrap_or("");
                    let gap = width.saturating_sub(label.chars().count() + shortcut.len() + 1);
                    let text = format!("{}{}{} ", label, " ".repeat(gap), shortcut);
                    let line_style = if i == self.selected {
                        highlight_style(&colors)
                    } else {
                        style
                    };
                    Line::from(Span::styled(text, line_style))
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
