use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Frame, layout::Rect, widgets::Block};
use tracing::{debug, warn};

use examdeck_core::{
    context_menu::{ContextTarget, Hit, MenuCommand},
    edit::{EditOutcome, delete_question},
    prompt::Prompt,
    router::strip_hash,
    session::{Activation, Session},
    theme::{self, PreferenceStore, Theme},
};

use crate::help_popup::HelpPopup;
use crate::keybinds::{Action, InputMode, process_normal_key};
use crate::ui::{self, HitMap, Palette};

/// Opens an external URL outside the terminal.
pub type Opener = fn(&str) -> std::io::Result<()>;

/// Blocking dialogs shown over everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    ConfirmDelete {
        target: ContextTarget,
        question: String,
    },
    Notice(String),
}

/// Answers the edit controller with a decision already taken in a dialog,
/// and keeps any notices for display.
#[derive(Debug, Default)]
struct DialogPrompt {
    answer: bool,
    notices: Vec<String>,
}

impl Prompt for DialogPrompt {
    fn confirm(&mut self, _message: &str) -> bool {
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Screen placement of the open context menu.
#[derive(Debug, Clone, Default)]
struct MenuPlacement {
    index: usize,
    pos: (u16, u16),
    rect: Rect,
}

/// The main application state.
pub struct App {
    session: Session,
    prefs: Box<dyn PreferenceStore>,
    theme: Theme,
    open_external: Opener,
    pub should_quit: bool,
    mode: InputMode,
    help_popup: HelpPopup,
    /// Address-bar input buffer, without the leading `#`.
    address_input: String,
    address_cursor: usize,
    /// Index of the selected tile.
    selected: usize,
    /// Tile columns in the last draw, for vertical movement.
    columns: usize,
    hits: HitMap,
    menu: Option<MenuPlacement>,
    modal: Option<Modal>,
    status: String,
}

impl App {
    pub fn new(session: Session, prefs: Box<dyn PreferenceStore>, theme: Theme) -> Self {
        Self {
            session,
            prefs,
            theme,
            open_external: |url| open::that(url),
            should_quit: false,
            mode: InputMode::Normal,
            help_popup: HelpPopup::new(),
            address_input: String::new(),
            address_cursor: 0,
            selected: 0,
            columns: 1,
            hits: HitMap::default(),
            menu: None,
            modal: None,
            status: String::new(),
        }
    }

    /// Replace the function used to open external links.
    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.open_external = opener;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.session
            .tree()
            .grid()
            .tiles
            .get(self.selected)
            .map(|t| t.name.as_str())
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        if self.help_popup.visible {
            self.handle_help_key(key);
            return;
        }

        if self.menu.is_some() {
            self.handle_menu_key(key);
            return;
        }

        if self.mode == InputMode::Address {
            self.handle_address_key(key);
            return;
        }

        let action = process_normal_key(key);
        self.process_action(action);
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::SetMode(InputMode::Address) => {
                self.mode = InputMode::Address;
                self.address_input = strip_hash(self.session.location().fragment()).to_string();
                self.address_cursor = self.address_input.len();
            }
            Action::SetMode(mode) => self.mode = mode,
            Action::MoveLeft => self.move_selection(-1),
            Action::MoveRight => self.move_selection(1),
            Action::MoveUp => self.move_selection(-(self.columns as isize)),
            Action::MoveDown => self.move_selection(self.columns as isize),
            Action::Activate => {
                if let Some(name) = self.selected_name().map(str::to_string) {
                    self.activate_tile(&name);
                }
            }
            Action::Back => {
                if !self.session.location().can_go_back() {
                    self.status = "No earlier location".to_string();
                } else if self.session.back() {
                    self.selected = 0;
                }
            }
            Action::MenuOnTile => {
                if let Some(name) = self.selected_name().map(str::to_string) {
                    let pos = self
                        .hits
                        .tile_rect(&name)
                        .map(|r| (r.x + 2, r.y + 1))
                        .unwrap_or((self.hits.content.x + 1, self.hits.content.y + 1));
                    self.open_menu(Hit::Tile(name), pos);
                }
            }
            Action::MenuOnBackground => {
                let pos = (self.hits.content.x + 1, self.hits.content.y + 1);
                self.open_menu(Hit::Container, pos);
            }
            Action::Edit(MenuCommand::Paste) => {
                let target = ContextTarget::background(self.session.view().top());
                self.run_edit(MenuCommand::Paste, target);
            }
            Action::Edit(command) => {
                let Some(name) = self.selected_name().map(str::to_string) else {
                    self.status = "Nothing selected".to_string();
                    return;
                };
                let target = ContextTarget::entry(name, self.session.view().top());
                self.run_edit(command, target);
            }
            Action::ClearClipboard => {
                if !self.session.clipboard().is_empty() {
                    self.session.clear_clipboard();
                    self.status = "Clipboard cleared".to_string();
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::Help => self.help_popup.show(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.session.tree().grid().tiles.len();
        if count == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        if (0..count as isize).contains(&next) {
            self.selected = next as usize;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.session.tree().grid().tiles.len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::ConfirmDelete { target, question } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.finish_delete(target, true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.finish_delete(target, false);
                }
                _ => self.modal = Some(Modal::ConfirmDelete { target, question }),
            },
            Modal::Notice(message) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {}
                _ => self.modal = Some(Modal::Notice(message)),
            },
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => self.help_popup.hide(),
            KeyCode::Char('j') | KeyCode::Down => self.help_popup.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.help_popup.scroll_up(),
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let count = self.session.menu().map_or(0, |m| m.items.len());
        let Some(placement) = self.menu.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_menu(),
            KeyCode::Char('j') | KeyCode::Down => {
                if placement.index + 1 < count {
                    placement.index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                placement.index = placement.index.saturating_sub(1);
            }
            KeyCode::Enter => {
                let index = placement.index;
                self.choose_menu_item(index);
            }
            _ => {}
        }
    }

    fn handle_address_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.address_input.clear();
                self.address_cursor = 0;
            }
            KeyCode::Enter => {
                let fragment = self.address_input.trim().to_string();
                self.mode = InputMode::Normal;
                self.address_input.clear();
                self.address_cursor = 0;
                if self.session.navigate(&fragment) {
                    self.selected = 0;
                }
            }
            KeyCode::Char(c) => {
                self.address_input.insert(self.address_cursor, c);
                self.address_cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                if self.address_cursor > 0 {
                    let prev = self.prev_boundary();
                    self.address_input.drain(prev..self.address_cursor);
                    self.address_cursor = prev;
                }
            }
            KeyCode::Left => {
                self.address_cursor = self.prev_boundary();
            }
            KeyCode::Right => {
                if self.address_cursor < self.address_input.len() {
                    self.address_cursor = self.address_input[self.address_cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.address_cursor + i)
                        .unwrap_or(self.address_input.len());
                }
            }
            _ => {}
        }
    }

    fn prev_boundary(&self) -> usize {
        self.address_input[..self.address_cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    // ── Mouse ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);

        if self.modal.is_some() {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                && matches!(self.modal, Some(Modal::Notice(_)))
            {
                self.modal = None;
            }
            return;
        }

        if self.help_popup.visible {
            if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                self.help_popup.hide();
            }
            return;
        }

        if let Some(placement) = &self.menu {
            let inside = placement
                .rect
                .contains(ratatui::layout::Position::new(column, row));
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if inside => {
                    let index = usize::from(row.saturating_sub(placement.rect.y + 1));
                    let count = self.session.menu().map_or(0, |m| m.items.len());
                    if index < count {
                        self.choose_menu_item(index);
                    }
                    return;
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    self.close_menu();
                    return;
                }
                MouseEventKind::Down(MouseButton::Right) if !inside => {
                    self.close_menu();
                }
                _ => return,
            }
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.hits.on_back(column, row) {
                    if self.session.activate_back_control() == Activation::Navigated {
                        self.selected = 0;
                    }
                } else if let Some(name) = self.hits.tile_at(column, row).map(str::to_string) {
                    self.select_named(&name);
                    self.activate_tile(&name);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let hit = self.hits.hit(column, row);
                if let Hit::Tile(name) = &hit {
                    self.select_named(name);
                }
                self.open_menu(hit, (column, row));
            }
            MouseEventKind::ScrollDown => self.move_selection(self.columns as isize),
            MouseEventKind::ScrollUp => self.move_selection(-(self.columns as isize)),
            _ => {}
        }
    }

    fn select_named(&mut self, name: &str) {
        if let Some(i) = self
            .session
            .tree()
            .grid()
            .tiles
            .iter()
            .position(|t| t.name == name)
        {
            self.selected = i;
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    fn activate_tile(&mut self, name: &str) {
        match self.session.activate_tile(name) {
            Activation::Navigated => self.selected = 0,
            Activation::OpenExternal(url) => self.open_link(name, &url),
            Activation::Ignored => {}
        }
    }

    fn open_link(&mut self, name: &str, url: &str) {
        if !url.contains("://") {
            self.status = format!("No link set for {name}");
            return;
        }
        match (self.open_external)(url) {
            Ok(()) => {
                debug!(url, "opened link");
                self.status = format!("Opened {name}");
            }
            Err(err) => {
                warn!(url, %err, "failed to open link");
                self.status = format!("Could not open {name}: {err}");
            }
        }
    }

    fn open_menu(&mut self, hit: Hit, pos: (u16, u16)) {
        let Some(menu) = self.session.open_context_menu(&hit) else {
            return;
        };
        if menu.items.is_empty() {
            self.session.dismiss_menu();
            return;
        }
        self.menu = Some(MenuPlacement {
            index: 0,
            pos,
            rect: Rect::default(),
        });
    }

    fn close_menu(&mut self) {
        self.menu = None;
        self.session.dismiss_menu();
    }

    fn choose_menu_item(&mut self, index: usize) {
        let command = self.session.menu().and_then(|m| m.items.get(index).copied());
        let target = self.session.context_target().cloned();
        self.close_menu();
        if let (Some(command), Some(target)) = (command, target) {
            self.run_edit(command, target);
        }
    }

    /// Run an edit command, routing delete through a confirmation dialog.
    fn run_edit(&mut self, command: MenuCommand, target: ContextTarget) {
        if command == MenuCommand::Delete {
            if let Some(name) = target.key.as_deref() {
                self.modal = Some(Modal::ConfirmDelete {
                    question: delete_question(name),
                    target,
                });
                return;
            }
        }
        let mut prompt = DialogPrompt::default();
        let result = self.session.run(command, &target, &mut prompt);
        self.after_edit(result, prompt);
    }

    fn finish_delete(&mut self, target: ContextTarget, answer: bool) {
        let mut prompt = DialogPrompt {
            answer,
            ..DialogPrompt::default()
        };
        let result = self
            .session
            .run(MenuCommand::Delete, &target, &mut prompt);
        self.after_edit(result, prompt);
    }

    fn after_edit(
        &mut self,
        result: Result<EditOutcome, examdeck_core::error::EditError>,
        mut prompt: DialogPrompt,
    ) {
        self.status = match result {
            Ok(EditOutcome::Captured { mode, name }) => format!("{} {name}", capitalize(mode.label())),
            Ok(EditOutcome::Deleted { name }) => format!("Deleted {name}"),
            Ok(EditOutcome::Kept { name }) => format!("Kept {name}"),
            Ok(EditOutcome::Pasted { name, moved: true }) => format!("Moved here as {name}"),
            Ok(EditOutcome::Pasted { name, moved: false }) => format!("Pasted {name}"),
            Err(err) => capitalize(&err.to_string()),
        };
        if let Some(notice) = prompt.notices.pop() {
            self.modal = Some(Modal::Notice(notice));
        }
        self.clamp_selection();
    }

    fn toggle_theme(&mut self) {
        match theme::toggle_theme(self.prefs.as_mut(), self.theme) {
            Ok(next) => self.theme = next,
            Err(err) => {
                warn!(%err, "failed to save theme");
                self.theme = self.theme.toggled();
                self.status = "Theme not saved".to_string();
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the entire application.
    pub fn render(&mut self, frame: &mut Frame) {
        let palette = Palette::for_theme(self.theme());
        let area = frame.area();
        frame.render_widget(Block::default().style(palette.base()), area);

        let (address_area, content_area, status_area) = ui::standard_layout(area);

        if self.mode == InputMode::Address {
            ui::render_address_input(
                frame,
                address_area,
                &self.address_input,
                self.address_cursor,
                &palette,
            );
        } else {
            ui::render_address_bar(
                frame,
                address_area,
                self.session.location().fragment(),
                &palette,
            );
        }

        self.hits = ui::render_content(
            frame,
            content_area,
            self.session.tree(),
            self.selected,
            &palette,
        );
        let grid_width = content_area.width.saturating_sub(2);
        self.columns = ui::grid_columns(grid_width);

        let clipboard = self
            .session
            .clipboard()
            .entry()
            .map(|e| format!("{} {}", e.mode.label(), e.source_name));
        ui::render_status_bar(
            frame,
            status_area,
            self.mode,
            clipboard.as_deref(),
            &self.status,
        );

        // Overlays
        if let (Some(placement), Some(menu)) = (self.menu.as_mut(), self.session.menu()) {
            let title = menu.target.key.as_deref().unwrap_or("Here");
            placement.rect = ui::render_context_menu(
                frame,
                placement.pos,
                title,
                &menu.items,
                placement.index,
                &palette,
            );
        }
        match &self.modal {
            Some(Modal::ConfirmDelete { question, .. }) => {
                ui::render_modal(frame, "Delete", question, "y: delete   n: keep", &palette, true);
            }
            Some(Modal::Notice(message)) => {
                ui::render_modal(frame, "Notice", message, "Enter: ok", &palette, false);
            }
            None => {}
        }
        self.help_popup.render(frame, area);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use examdeck_core::{
        edit::PASTE_REJECTED, router::ViewState, seed::Seed, store::HierarchyStore,
        theme::MemoryPreferences,
    };
    use ratatui::{Terminal, backend::TestBackend, style::Modifier};

    fn app(fragment: &str) -> App {
        let session = Session::new(HierarchyStore::from_seed(Seed::builtin()), fragment);
        App::new(session, Box::new(MemoryPreferences::default()), Theme::Dark)
            .with_opener(|_| Ok(()))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn click(app: &mut App, button: MouseButton, column: u16, row: u16) {
        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
    }

    #[test]
    fn test_enter_opens_folder_and_backspace_returns() {
        let mut app = app("");
        draw(&mut app);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.selected_name(), Some("CDS"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().view(), &ViewState::Inside("CDS".to_string()));
        assert_eq!(app.selected_name(), Some("English PYQ"));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().view(), &ViewState::Root);
    }

    #[test]
    fn test_backspace_without_history_reports_status() {
        let mut app = app("#CDS");
        draw(&mut app);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.status(), "No earlier location");
        assert_eq!(app.session().view(), &ViewState::Inside("CDS".to_string()));
    }

    #[test]
    fn test_placeholder_link_is_not_opened() {
        let mut app = app("#CDS");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status(), "No link set for English PYQ");

        let mut app = self::app("#NDA-NA");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status(), "Opened Maths PYQ");
    }

    #[test]
    fn test_delete_asks_first() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.modal(),
            Some(&Modal::ConfirmDelete {
                target: ContextTarget::entry("NDA & NA", None),
                question: "Are you sure you want to delete \"NDA & NA\"?".to_string(),
            })
        );

        press(&mut app, KeyCode::Char('n'));
        assert!(app.modal().is_none());
        assert!(app.session().store().contains_top("NDA & NA"));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.session().store().contains_top("NDA & NA"));
        assert_eq!(app.status(), "Deleted NDA & NA");
    }

    #[test]
    fn test_cross_level_paste_shows_notice() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('y'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.modal(), Some(&Modal::Notice(PASTE_REJECTED.to_string())));

        press(&mut app, KeyCode::Enter);
        assert!(app.modal().is_none());
        assert!(!app.session().clipboard().is_empty());
    }

    #[test]
    fn test_cut_tile_renders_dimmed() {
        let mut app = app("");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('x'));
        let terminal = draw(&mut app);

        let rect = app.hits.tile_rect("CDS").unwrap();
        // Icon cell inside the tile border.
        let cell = &terminal.backend().buffer()[(rect.x + 1, rect.y + 1)];
        assert!(cell.modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_right_click_menu_and_outside_dismiss() {
        let mut app = app("");
        draw(&mut app);
        let rect = app.hits.tile_rect("JEE").unwrap();

        click(&mut app, MouseButton::Right, rect.x + 2, rect.y + 1);
        let menu = app.session().menu().unwrap();
        assert_eq!(menu.target, ContextTarget::entry("JEE", None));
        assert_eq!(app.selected_name(), Some("JEE"));
        draw(&mut app);

        // Address bar row is outside the menu.
        click(&mut app, MouseButton::Left, 0, 0);
        assert!(app.session().menu().is_none());
        assert_eq!(app.session().view(), &ViewState::Root);
    }

    #[test]
    fn test_menu_click_runs_command() {
        let mut app = app("");
        draw(&mut app);
        let rect = app.hits.tile_rect("NEET").unwrap();
        click(&mut app, MouseButton::Right, rect.x + 2, rect.y + 1);
        draw(&mut app);

        // First item is Copy, on the row below the menu border.
        let menu_rect = app.menu.as_ref().unwrap().rect;
        click(&mut app, MouseButton::Left, menu_rect.x + 2, menu_rect.y + 1);
        assert_eq!(app.status(), "Copy NEET");

        // Background right-click now offers only Paste.
        let content = app.hits.content;
        click(
            &mut app,
            MouseButton::Right,
            content.x + content.width - 2,
            content.y + content.height - 2,
        );
        assert_eq!(
            app.session().menu().unwrap().items,
            vec![MenuCommand::Paste]
        );
        press(&mut app, KeyCode::Enter);
        assert!(app.session().store().contains_top("NEET (Copy)"));
    }

    #[test]
    fn test_empty_background_menu_is_not_shown() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('M'));
        assert!(app.menu.is_none());
        assert_eq!(
            app.session().context_target(),
            Some(&ContextTarget::background(None))
        );
    }

    #[test]
    fn test_back_control_click() {
        let mut app = app("#JEE");
        draw(&mut app);
        let back = app.hits.back.unwrap();
        click(&mut app, MouseButton::Left, back.x, back.y);
        assert_eq!(app.session().view(), &ViewState::Root);
        assert_eq!(app.session().location().fragment(), "");
    }

    #[test]
    fn test_address_bar_navigation() {
        let mut app = app("#CDS");
        press(&mut app, KeyCode::Char(':'));
        // Backspace edits text here instead of going back.
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "SSC-JE".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().view(), &ViewState::Inside("SSC-JE".to_string()));

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().view(), &ViewState::Inside("CDS".to_string()));
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(
            app.prefs.get(theme::THEME_KEY).unwrap().as_deref(),
            Some("light-mode")
        );
    }

    #[test]
    fn test_help_blocks_other_keys() {
        let mut app = app("");
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().view(), &ViewState::Root);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
