use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use examdeck_core::context_menu::MenuCommand;

/// Input modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Browsing tiles.
    #[default]
    Normal,
    /// Typing into the address bar. Entered with `:`, left with `Esc` or `Enter`.
    Address,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Address => "ADDRESS",
        }
    }
}

/// Actions that can result from a key press in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The key was consumed but nothing happens.
    None,
    Quit,
    SetMode(InputMode),
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Follow the selected tile's link.
    Activate,
    /// One step back in history.
    Back,
    /// Open the context menu on the selected tile.
    MenuOnTile,
    /// Open the context menu on the container background.
    MenuOnBackground,
    /// Run an edit command directly.
    Edit(MenuCommand),
    /// Drop the clipboard contents.
    ClearClipboard,
    ToggleTheme,
    Help,
}

/// Map a Normal-mode key to an action.
pub fn process_normal_key(key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Enter => Action::Activate,
        KeyCode::Backspace => Action::Back,
        KeyCode::Char('m') => Action::MenuOnTile,
        KeyCode::Char('M') => Action::MenuOnBackground,
        KeyCode::Char('y') => Action::Edit(MenuCommand::Copy),
        KeyCode::Char('x') => Action::Edit(MenuCommand::Cut),
        KeyCode::Char('d') => Action::Edit(MenuCommand::Delete),
        KeyCode::Char('p') => Action::Edit(MenuCommand::Paste),
        KeyCode::Esc => Action::ClearClipboard,
        KeyCode::Char(':') => Action::SetMode(InputMode::Address),
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(KeyCode::Char('j'), Action::MoveDown)]
    #[case(KeyCode::Down, Action::MoveDown)]
    #[case(KeyCode::Char('h'), Action::MoveLeft)]
    #[case(KeyCode::Enter, Action::Activate)]
    #[case(KeyCode::Backspace, Action::Back)]
    #[case(KeyCode::Char('y'), Action::Edit(MenuCommand::Copy))]
    #[case(KeyCode::Char('x'), Action::Edit(MenuCommand::Cut))]
    #[case(KeyCode::Char('d'), Action::Edit(MenuCommand::Delete))]
    #[case(KeyCode::Char('p'), Action::Edit(MenuCommand::Paste))]
    #[case(KeyCode::Char(':'), Action::SetMode(InputMode::Address))]
    #[case(KeyCode::Char('z'), Action::None)]
    fn test_normal_keys(#[case] code: KeyCode, #[case] expected: Action) {
        assert_eq!(process_normal_key(key(code)), expected);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(process_normal_key(ev), Action::Quit);
    }
}
