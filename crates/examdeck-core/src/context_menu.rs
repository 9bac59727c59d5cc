use crate::clipboard::Clipboard;
use crate::router::ViewState;

/// The entity or container last right-clicked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextTarget {
    /// Folder name, or `None` when the background was clicked.
    pub key: Option<String>,
    /// Top-level folder being viewed, or `None` at the root.
    pub parent_key: Option<String>,
}

impl ContextTarget {
    pub fn entry(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            key: Some(name.into()),
            parent_key: parent.map(str::to_string),
        }
    }

    pub fn background(parent: Option<&str>) -> Self {
        Self {
            key: None,
            parent_key: parent.map(str::to_string),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.key.is_some()
    }
}

/// Where a right-click landed, as reported by the rendering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Tile(String),
    /// Empty space inside the content container.
    Container,
    /// Anywhere else; not handled.
    Outside,
}

/// Commands offered by the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Copy,
    Cut,
    Delete,
    Paste,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 4] = [Self::Copy, Self::Cut, Self::Delete, Self::Paste];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Copy => "Copy",
            Self::Cut => "Cut",
            Self::Delete => "Delete",
            Self::Paste => "Paste",
        }
    }

    /// Copy/cut/delete need a folder; paste needs the background and
    /// something on the clipboard.
    pub fn is_visible(&self, target: &ContextTarget, clipboard: &Clipboard) -> bool {
        match self {
            Self::Copy | Self::Cut | Self::Delete => target.is_entry(),
            Self::Paste => !target.is_entry() && !clipboard.is_empty(),
        }
    }
}

/// Capture the context target for a right-click in the given view.
pub fn capture(hit: &Hit, view: &ViewState) -> Option<ContextTarget> {
    match hit {
        Hit::Tile(name) => Some(ContextTarget::entry(name.clone(), view.top())),
        Hit::Container => Some(ContextTarget::background(view.top())),
        Hit::Outside => None,
    }
}

/// An open context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub target: ContextTarget,
    pub items: Vec<MenuCommand>,
}

impl ContextMenu {
    /// Open a menu for `hit`, or `None` when the click is not ours to handle.
    pub fn open(hit: &Hit, view: &ViewState, clipboard: &Clipboard) -> Option<Self> {
        let target = capture(hit, view)?;
        let items = MenuCommand::ALL
            .into_iter()
            .filter(|c| c.is_visible(&target, clipboard))
            .collect();
        Some(Self { target, items })
    }

    #[cfg(test)]
    pub fn offers(&self, command: MenuCommand) -> bool {
        self.items.contains(&command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardEntry, ClipboardMode, Payload};

    fn loaded_clipboard() -> Clipboard {
        let mut clipboard = Clipboard::new();
        clipboard.set(ClipboardEntry {
            mode: ClipboardMode::Copy,
            payload: Payload::Top(Vec::new()),
            source_name: "CDS".to_string(),
            source_parent: None,
        });
        clipboard
    }

    #[test]
    fn test_tile_click_at_root() {
        let menu = ContextMenu::open(
            &Hit::Tile("CDS".to_string()),
            &ViewState::Root,
            &Clipboard::new(),
        )
        .unwrap();
        assert_eq!(menu.target, ContextTarget::entry("CDS", None));
        assert_eq!(
            menu.items,
            vec![MenuCommand::Copy, MenuCommand::Cut, MenuCommand::Delete]
        );
    }

    #[test]
    fn test_tile_click_inside_folder_records_parent() {
        let view = ViewState::Inside("CDS".to_string());
        let menu = ContextMenu::open(&Hit::Tile("GK PYQ".to_string()), &view, &loaded_clipboard())
            .unwrap();
        assert_eq!(menu.target, ContextTarget::entry("GK PYQ", Some("CDS")));
        assert!(!menu.offers(MenuCommand::Paste));
    }

    #[test]
    fn test_background_click_offers_paste_only_with_clipboard() {
        let view = ViewState::Inside("AFCAT".to_string());

        let empty = ContextMenu::open(&Hit::Container, &view, &Clipboard::new()).unwrap();
        assert_eq!(empty.target, ContextTarget::background(Some("AFCAT")));
        assert!(empty.items.is_empty());

        let loaded = ContextMenu::open(&Hit::Container, &view, &loaded_clipboard()).unwrap();
        assert_eq!(loaded.items, vec![MenuCommand::Paste]);
    }

    #[test]
    fn test_outside_click_is_not_handled() {
        assert!(ContextMenu::open(&Hit::Outside, &ViewState::Root, &loaded_clipboard()).is_none());
    }
}
