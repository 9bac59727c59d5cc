//! Declarative description of the main content region.
//!
//! Rendering is a pure function of (store, view state, clipboard). Backends
//! draw a [`ViewTree`]; they never read the store themselves.

use std::fmt;

use tracing::debug;

use crate::clipboard::Clipboard;
use crate::router::{ViewState, href_for};
use crate::store::{HierarchyStore, LeafNode};

/// `rel` attribute for outbound links.
pub const SAFE_REL: &str = "noopener noreferrer";

/// Where activating a tile or control leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// In-app navigation to a fragment such as `#CDS` (or `""` for the root).
    Fragment(String),
    /// Outbound link, opened in a new context without opener or referrer.
    External { url: String, rel: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub name: String,
    pub link: Link,
    /// Cut and waiting for a paste.
    pub pending_removal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTree {
    Root {
        grid: Grid,
    },
    Inside {
        title: String,
        back: Link,
        grid: Grid,
    },
}

impl ViewTree {
    pub fn grid(&self) -> &Grid {
        match self {
            Self::Root { grid } | Self::Inside { grid, .. } => grid,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Root { .. } => None,
            Self::Inside { title, .. } => Some(title),
        }
    }

    pub fn tile(&self, name: &str) -> Option<&Tile> {
        self.grid().tiles.iter().find(|t| t.name == name)
    }

    pub fn tile_names(&self) -> Vec<&str> {
        self.grid().tiles.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Result of rendering a view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    View(ViewTree),
    /// The folder to show does not exist; clear the fragment and go to the root.
    Redirect,
}

pub fn render_root(names: &[&str], clipboard: &Clipboard) -> ViewTree {
    let tiles = names
        .iter()
        .map(|name| Tile {
            name: name.to_string(),
            link: Link::Fragment(href_for(name)),
            pending_removal: clipboard.is_pending_removal(name, None),
        })
        .collect();
    ViewTree::Root {
        grid: Grid { tiles },
    }
}

pub fn render_inside(top: &str, leaves: &[LeafNode], clipboard: &Clipboard) -> ViewTree {
    let tiles = leaves
        .iter()
        .map(|leaf| Tile {
            name: leaf.name.clone(),
            link: Link::External {
                url: leaf.url.clone(),
                rel: SAFE_REL,
            },
            pending_removal: clipboard.is_pending_removal(&leaf.name, Some(top)),
        })
        .collect();
    ViewTree::Inside {
        title: top.to_string(),
        back: Link::Fragment(String::new()),
        grid: Grid { tiles },
    }
}

pub fn render(store: &HierarchyStore, view: &ViewState, clipboard: &Clipboard) -> Rendered {
    match view {
        ViewState::Root => Rendered::View(render_root(&store.list_top(), clipboard)),
        ViewState::Inside(top) => match store.list_children(top) {
            Ok(leaves) => Rendered::View(render_inside(top, leaves, clipboard)),
            Err(err) => {
                debug!(%err, "redirecting to root");
                Rendered::Redirect
            }
        },
    }
}

/// Plain-text outline, one tile per line. Cut tiles are marked with `~`.
impl fmt::Display for ViewTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Self::Inside { title, .. } = self {
            writeln!(f, "\u{2190} Back  {title}")?;
        }
        for tile in &self.grid().tiles {
            let marker = if tile.pending_removal { '~' } else { ' ' };
            match &tile.link {
                Link::Fragment(href) => writeln!(f, "{marker} {}  ({href})", tile.name)?,
                Link::External { url, .. } => writeln!(f, "{marker} {}  -> {url}", tile.name)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardEntry, ClipboardMode, Payload};
    use crate::seed::Seed;

    fn cut(name: &str, parent: Option<&str>) -> Clipboard {
        let mut clipboard = Clipboard::new();
        clipboard.set(ClipboardEntry {
            mode: ClipboardMode::Cut,
            payload: Payload::Top(Vec::new()),
            source_name: name.to_string(),
            source_parent: parent.map(str::to_string),
        });
        clipboard
    }

    #[test]
    fn test_root_lists_every_top_in_order() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        let tree = render_root(&store.list_top(), &Clipboard::new());
        assert_eq!(tree.tile_names(), store.list_top());
        assert_eq!(
            tree.tile("NDA & NA").unwrap().link,
            Link::Fragment("#NDA-NA".to_string())
        );
        assert!(tree.title().is_none());
    }

    #[test]
    fn test_root_marks_only_the_cut_top() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        let tree = render_root(&store.list_top(), &cut("CDS", None));
        let marked: Vec<&str> = tree
            .grid()
            .tiles
            .iter()
            .filter(|t| t.pending_removal)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(marked, vec!["CDS"]);

        let tree = render_root(&store.list_top(), &cut("CDS", Some("NEET")));
        assert!(tree.grid().tiles.iter().all(|t| !t.pending_removal));
    }

    #[test]
    fn test_inside_has_back_link_and_external_tiles() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        let leaves = store.list_children("CDS").unwrap();
        let tree = render_inside("CDS", leaves, &cut("GK PYQ", Some("CDS")));

        match &tree {
            ViewTree::Inside { title, back, .. } => {
                assert_eq!(title, "CDS");
                assert_eq!(back, &Link::Fragment(String::new()));
            }
            other => panic!("expected folder view, got {other:?}"),
        }

        let gk = tree.tile("GK PYQ").unwrap();
        assert!(gk.pending_removal);
        assert!(matches!(
            &gk.link,
            Link::External { rel, .. } if *rel == SAFE_REL
        ));
        assert!(!tree.tile("English PYQ").unwrap().pending_removal);
    }

    #[test]
    fn test_render_missing_top_redirects() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        let view = ViewState::Inside("Gone".to_string());
        assert_eq!(render(&store, &view, &Clipboard::new()), Rendered::Redirect);
    }

    #[test]
    fn test_render_is_deterministic() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        let clipboard = cut("JEE", None);
        let view = ViewState::Inside("JEE".to_string());
        assert_eq!(
            render(&store, &view, &clipboard),
            render(&store, &view, &clipboard)
        );
    }

    #[test]
    fn test_empty_store_renders_empty_grid() {
        let store = HierarchyStore::new();
        match render(&store, &ViewState::Root, &Clipboard::new()) {
            Rendered::View(tree) => assert!(tree.grid().tiles.is_empty()),
            Rendered::Redirect => panic!("root never redirects"),
        }
    }

    #[test]
    fn test_display_outline() {
        let mut store = HierarchyStore::new();
        store.insert_top("CDS", vec![LeafNode::new("GK PYQ", "#")]);
        let text = render_inside("CDS", store.list_children("CDS").unwrap(), &Clipboard::new())
            .to_string();
        assert_eq!(text, "\u{2190} Back  CDS\n  GK PYQ  -> #\n");
    }
}
