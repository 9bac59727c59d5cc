use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use examdeck_core::context_menu::{Hit, MenuCommand};
use examdeck_core::theme::Theme;
use examdeck_core::view::{Link, Tile, ViewTree};

use crate::keybinds::InputMode;

pub const TILE_WIDTH: u16 = 26;
pub const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;
const BACK_LABEL: &str = "\u{2190} Back";
const MENU_WIDTH: u16 = 18;

// ── Palette ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub folder: Color,
    pub link: Color,
    pub muted: Color,
    pub danger: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                folder: Color::Blue,
                link: Color::Green,
                muted: Color::DarkGray,
                danger: Color::Red,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                folder: Color::Blue,
                link: Color::Magenta,
                muted: Color::Gray,
                danger: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

// ── Hit testing ──────────────────────────────────────────────────────

/// Screen regions recorded during the last draw, for mouse handling.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub content: Rect,
    pub back: Option<Rect>,
    pub tiles: Vec<(Rect, String)>,
}

impl HitMap {
    /// Classify a right-click at `(column, row)`.
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if let Some(name) = self.tile_at(column, row) {
            return Hit::Tile(name.to_string());
        }
        if self.content.contains(pos) {
            Hit::Container
        } else {
            Hit::Outside
        }
    }

    pub fn tile_at(&self, column: u16, row: u16) -> Option<&str> {
        let pos = Position::new(column, row);
        self.tiles
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, name)| name.as_str())
    }

    pub fn tile_rect(&self, name: &str) -> Option<Rect> {
        self.tiles
            .iter()
            .find(|(_, n)| n == name)
            .map(|(rect, _)| *rect)
    }

    pub fn on_back(&self, column: u16, row: u16) -> bool {
        self.back
            .is_some_and(|rect| rect.contains(Position::new(column, row)))
    }
}

// ── Layout ───────────────────────────────────────────────────────────

/// Address bar (1 line) + main content + status bar (1 line).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [address_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (address_area, content_area, status_area)
}

/// Number of tile columns that fit in `width`.
pub fn grid_columns(width: u16) -> usize {
    usize::from(((width + TILE_GAP) / (TILE_WIDTH + TILE_GAP)).max(1))
}

/// Rects for `count` tiles laid out row by row, scrolled so `selected` is
/// visible. Tiles that fall outside `area` get no rect.
pub fn grid_layout(area: Rect, count: usize, selected: usize) -> Vec<Option<Rect>> {
    let columns = grid_columns(area.width);
    let visible_rows = usize::from((area.height / TILE_HEIGHT).max(1));
    let first_row = (selected / columns).saturating_sub(visible_rows - 1);
    let width = TILE_WIDTH.min(area.width);

    (0..count)
        .map(|i| {
            let row = i / columns;
            if row < first_row || row >= first_row + visible_rows {
                return None;
            }
            let col = (i % columns) as u16;
            let x = area.x + col * (TILE_WIDTH + TILE_GAP);
            let y = area.y + (row - first_row) as u16 * TILE_HEIGHT;
            Some(Rect::new(x, y, width, TILE_HEIGHT))
        })
        .collect()
}

/// Helper to create a centered rect within a given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

// ── Bars ─────────────────────────────────────────────────────────────

/// Render the address bar showing the current fragment.
pub fn render_address_bar(frame: &mut Frame, area: Rect, fragment: &str, palette: &Palette) {
    let shown = if fragment.is_empty() { "#" } else { fragment };
    let line = Line::from(vec![
        Span::styled(" examdeck ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(shown.to_string(), Style::default().fg(palette.accent)),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

/// Render the address bar while it is being edited.
pub fn render_address_input(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    cursor: usize,
    palette: &Palette,
) {
    const LABEL: &str = " go to #";
    let line = Line::from(vec![
        Span::styled(
            LABEL,
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(input.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);

    let cursor_x = area.x + LABEL.width() as u16 + input[..cursor].width() as u16;
    if cursor_x < area.x + area.width {
        frame.set_cursor_position((cursor_x, area.y));
    }
}

/// Render the bottom status bar.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    clipboard: Option<&str>,
    message: &str,
) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
    ];
    if let Some(clip) = clipboard {
        spans.push(Span::styled(
            format!("[{clip}] "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::raw(message.to_string()));
    spans.push(Span::styled(
        "  ?:help  q:quit",
        Style::default().add_modifier(Modifier::DIM),
    ));

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

// ── Content ──────────────────────────────────────────────────────────

/// Draw the view tree into `area` and return where everything landed.
pub fn render_content(
    frame: &mut Frame,
    area: Rect,
    tree: &ViewTree,
    selected: usize,
    palette: &Palette,
) -> HitMap {
    let title = match tree.title() {
        Some(_) => " Folder ",
        None => " Exams ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted))
        .style(palette.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut hits = HitMap {
        content: area,
        ..HitMap::default()
    };

    let grid_area = match tree {
        ViewTree::Inside { title, .. } => {
            let [header, _, rest] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(inner);
            let back_width = BACK_LABEL.width() as u16;
            let line = Line::from(vec![
                Span::styled(
                    BACK_LABEL,
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]);
            frame.render_widget(Paragraph::new(line), header);
            hits.back = Some(Rect::new(
                header.x,
                header.y,
                back_width.min(header.width),
                1,
            ));
            rest
        }
        ViewTree::Root { .. } => inner,
    };

    let tiles = &tree.grid().tiles;
    if tiles.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No folders",
            Style::default().fg(palette.muted).add_modifier(Modifier::DIM),
        ));
        frame.render_widget(empty, grid_area);
        return hits;
    }

    for (i, (tile, rect)) in tiles
        .iter()
        .zip(grid_layout(grid_area, tiles.len(), selected))
        .enumerate()
    {
        let Some(rect) = rect else { continue };
        render_tile(frame, rect, tile, i == selected, palette);
        hits.tiles.push((rect, tile.name.clone()));
    }

    hits
}

fn render_tile(frame: &mut Frame, area: Rect, tile: &Tile, selected: bool, palette: &Palette) {
    let (icon, color) = match tile.link {
        Link::Fragment(_) => ("\u{25B6} ", palette.folder),
        Link::External { .. } => ("\u{2197} ", palette.link),
    };

    let text_style = if tile.pending_removal {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(color)
    };
    let border_style = if selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else if tile.pending_removal {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(palette.muted)
    };

    let room = usize::from(area.width.saturating_sub(2)).saturating_sub(icon.width());
    let line = Line::from(vec![
        Span::styled(icon, text_style),
        Span::styled(truncate(&tile.name, room), text_style),
    ]);
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Cut `text` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

// ── Overlays ─────────────────────────────────────────────────────────

/// Draw the context menu with its top-left corner at `pos`, kept on screen.
/// Returns the rect it occupies.
pub fn render_context_menu(
    frame: &mut Frame,
    pos: (u16, u16),
    title: &str,
    items: &[MenuCommand],
    index: usize,
    palette: &Palette,
) -> Rect {
    let height = items.len() as u16 + 2;
    let max_x = frame.area().width.saturating_sub(MENU_WIDTH);
    let max_y = frame.area().height.saturating_sub(height);
    let area = Rect::new(pos.0.min(max_x), pos.1.min(max_y), MENU_WIDTH, height)
        .intersection(frame.area());
    frame.render_widget(Clear, area);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, command)| {
            let style = if i == index {
                Style::default()
                    .fg(palette.bg)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(Line::from(Span::styled(command.label(), style)))
        })
        .collect();
    let list = List::new(list_items).block(
        Block::default()
            .title(truncate(title, usize::from(MENU_WIDTH - 2)))
            .borders(Borders::ALL)
            .style(palette.base())
            .border_style(Style::default().fg(palette.accent)),
    );
    frame.render_widget(list, area);
    area
}

/// Draw a centered modal with a message and a footer hint.
pub fn render_modal(
    frame: &mut Frame,
    title: &str,
    message: &str,
    footer: &str,
    palette: &Palette,
    danger: bool,
) {
    let area = frame.area();
    let width = area.width.saturating_sub(4).min(56);
    let text_rows = (message.width() as u16 / width.saturating_sub(2).max(1)) + 1;
    let popup = centered_rect(width, (text_rows + 4).min(area.height), area);
    frame.render_widget(Clear, popup);

    let border = if danger { palette.danger } else { palette.accent };
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            footer.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .style(palette.base())
            .border_style(Style::default().fg(border).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 1)]
    #[case(26, 1)]
    #[case(53, 2)]
    #[case(79, 2)]
    #[case(80, 3)]
    fn test_grid_columns(#[case] width: u16, #[case] expected: usize) {
        assert_eq!(grid_columns(width), expected);
    }

    #[test]
    fn test_grid_layout_rows() {
        let area = Rect::new(1, 1, 81, 30);
        let rects = grid_layout(area, 5, 0);
        assert_eq!(rects[0], Some(Rect::new(1, 1, TILE_WIDTH, TILE_HEIGHT)));
        assert_eq!(rects[2], Some(Rect::new(55, 1, TILE_WIDTH, TILE_HEIGHT)));
        assert_eq!(rects[3], Some(Rect::new(1, 4, TILE_WIDTH, TILE_HEIGHT)));
    }

    #[test]
    fn test_grid_layout_scrolls_to_selection() {
        // One column, two visible rows.
        let area = Rect::new(0, 0, 20, 6);
        let rects = grid_layout(area, 5, 4);
        assert!(rects[0].is_none());
        assert!(rects[2].is_none());
        assert_eq!(rects[3], Some(Rect::new(0, 0, 20, TILE_HEIGHT)));
        assert_eq!(rects[4], Some(Rect::new(0, 3, 20, TILE_HEIGHT)));
    }

    #[test]
    fn test_hit_map() {
        let hits = HitMap {
            content: Rect::new(0, 1, 40, 10),
            back: Some(Rect::new(1, 2, 6, 1)),
            tiles: vec![(Rect::new(1, 4, 26, 3), "CDS".to_string())],
        };
        assert_eq!(hits.hit(5, 5), Hit::Tile("CDS".to_string()));
        assert_eq!(hits.hit(35, 8), Hit::Container);
        assert_eq!(hits.hit(35, 20), Hit::Outside);
        assert!(hits.on_back(3, 2));
        assert!(!hits.on_back(3, 3));
    }

    #[rstest]
    #[case("CDS", 10, "CDS")]
    #[case("Current Affairs", 8, "Current\u{2026}")]
    #[case("abc", 0, "\u{2026}")]
    fn test_truncate(#[case] text: &str, #[case] width: usize, #[case] expected: &str) {
        assert_eq!(truncate(text, width), expected);
    }
}
