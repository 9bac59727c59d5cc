use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::centered_rect;

/// A single entry in the help popup.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub key: &'static str,
    pub description: &'static str,
    pub section: &'static str,
}

impl HelpEntry {
    pub const fn new(section: &'static str, key: &'static str, description: &'static str) -> Self {
        Self {
            key,
            description,
            section,
        }
    }
}

/// Help popup state.
#[derive(Debug, Default)]
pub struct HelpPopup {
    pub visible: bool,
    scroll: u16,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.scroll = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Render the help popup centered on screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let lines = build_lines(HELP_ENTRIES);
        let popup_width = (area.width.saturating_sub(8)).min(60);
        let popup_height = (area.height.saturating_sub(6)).min(lines.len() as u16 + 2);
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        let max_scroll = (lines.len() as u16).saturating_sub(popup_height.saturating_sub(2));
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }
}

/// Display lines with a header each time the section changes.
fn build_lines(entries: &[HelpEntry]) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current_section: Option<&str> = None;

    for entry in entries {
        if current_section != Some(entry.section) {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!(" {}", entry.section),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
            current_section = Some(entry.section);
        }

        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:>12} ", entry.key),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(entry.description),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc/q/?  close    j/k  scroll",
        Style::default().add_modifier(Modifier::DIM),
    )));

    lines
}

pub const HELP_ENTRIES: &[HelpEntry] = &[
    HelpEntry::new("Browse", "h j k l", "Move selection"),
    HelpEntry::new("Browse", "Enter", "Open folder / open link"),
    HelpEntry::new("Browse", "Backspace", "Go back"),
    HelpEntry::new("Browse", ":", "Edit address"),
    HelpEntry::new("Edit", "m", "Menu on selected folder"),
    HelpEntry::new("Edit", "M", "Menu on background"),
    HelpEntry::new("Edit", "y / x", "Copy / cut selected folder"),
    HelpEntry::new("Edit", "d", "Delete selected folder"),
    HelpEntry::new("Edit", "p", "Paste here"),
    HelpEntry::new("Edit", "Esc", "Clear clipboard"),
    HelpEntry::new("Mouse", "Left click", "Open folder / link, Back"),
    HelpEntry::new("Mouse", "Right click", "Context menu"),
    HelpEntry::new("Other", "t", "Toggle dark / light"),
    HelpEntry::new("Other", "?", "This help"),
    HelpEntry::new("Other", "q / Ctrl-c", "Quit"),
];
