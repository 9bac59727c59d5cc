use crate::store::{LeafNode, TopNode};

// ── Clipboard ────────────────────────────────────────────────────────

/// Clipboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

impl ClipboardMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Cut => "cut",
        }
    }
}

/// Which level of the hierarchy an entry lives at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Top,
    Leaf,
}

impl Level {
    /// Level of a container given its parent folder (`None` is the root).
    pub fn of_parent(parent: Option<&str>) -> Self {
        match parent {
            None => Self::Top,
            Some(_) => Self::Leaf,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "top-level",
            Self::Leaf => "nested",
        }
    }
}

/// Detached copy of the data being moved or duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A whole top-level folder; its name lives in `ClipboardEntry::source_name`.
    Top(Vec<LeafNode>),
    Leaf(LeafNode),
}

impl Payload {
    pub fn from_top(top: &TopNode) -> Self {
        Self::Top(top.leaves.clone())
    }

    pub fn level(&self) -> Level {
        match self {
            Self::Top(_) => Level::Top,
            Self::Leaf(_) => Level::Leaf,
        }
    }
}

/// Item stored in the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub mode: ClipboardMode,
    pub payload: Payload,
    pub source_name: String,
    /// Folder the source lived in; `None` for top-level folders.
    pub source_parent: Option<String>,
}

impl ClipboardEntry {
    pub fn level(&self) -> Level {
        self.payload.level()
    }

    /// Name to try first when pasting.
    pub fn desired_name(&self) -> &str {
        match &self.payload {
            Payload::Leaf(leaf) if !leaf.name.is_empty() => &leaf.name,
            _ => &self.source_name,
        }
    }
}

/// At most one pending copy/cut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    entry: Option<ClipboardEntry>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self) -> Option<&ClipboardEntry> {
        self.entry.as_ref()
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        self.entry.as_ref().map(|e| e.mode)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Replace whatever was pending. An abandoned cut is simply forgotten.
    pub fn set(&mut self, entry: ClipboardEntry) {
        self.entry = Some(entry);
    }

    pub fn clear(&mut self) -> Option<ClipboardEntry> {
        self.entry.take()
    }

    /// Whether the entry `name` under `parent` is waiting to be moved away.
    pub fn is_pending_removal(&self, name: &str, parent: Option<&str>) -> bool {
        self.entry
            .as_ref()
            .map(|e| {
                e.mode == ClipboardMode::Cut
                    && e.source_name == name
                    && e.source_parent.as_deref() == parent
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cut_leaf(name: &str, parent: &str) -> ClipboardEntry {
        ClipboardEntry {
            mode: ClipboardMode::Cut,
            payload: Payload::Leaf(LeafNode::new(name, "#")),
            source_name: name.to_string(),
            source_parent: Some(parent.to_string()),
        }
    }

    #[test]
    fn test_pending_removal_matches_name_and_parent() {
        let mut clipboard = Clipboard::new();
        assert!(!clipboard.is_pending_removal("GK PYQ", Some("CDS")));

        clipboard.set(cut_leaf("GK PYQ", "CDS"));
        assert!(clipboard.is_pending_removal("GK PYQ", Some("CDS")));
        assert!(!clipboard.is_pending_removal("GK PYQ", Some("AFCAT")));
        assert!(!clipboard.is_pending_removal("GK PYQ", None));
        assert!(!clipboard.is_pending_removal("Maths PYQ", Some("CDS")));
    }

    #[test]
    fn test_copy_is_never_pending_removal() {
        let mut clipboard = Clipboard::new();
        let mut entry = cut_leaf("GK PYQ", "CDS");
        entry.mode = ClipboardMode::Copy;
        clipboard.set(entry);
        assert!(!clipboard.is_pending_removal("GK PYQ", Some("CDS")));
    }

    #[test]
    fn test_set_overwrites_and_clear_empties() {
        let mut clipboard = Clipboard::new();
        clipboard.set(cut_leaf("A", "CDS"));
        clipboard.set(cut_leaf("B", "CDS"));
        assert_eq!(clipboard.entry().unwrap().source_name, "B");

        let taken = clipboard.clear();
        assert!(taken.is_some());
        assert!(clipboard.is_empty());
        assert_eq!(clipboard.mode(), None);
    }

    #[test]
    fn test_desired_name() {
        let top = ClipboardEntry {
            mode: ClipboardMode::Copy,
            payload: Payload::Top(Vec::new()),
            source_name: "CDS".to_string(),
            source_parent: None,
        };
        assert_eq!(top.desired_name(), "CDS");
        assert_eq!(top.level(), Level::Top);

        let leaf = cut_leaf("GK PYQ", "CDS");
        assert_eq!(leaf.desired_name(), "GK PYQ");
        assert_eq!(leaf.level(), Level::Leaf);
    }
}
