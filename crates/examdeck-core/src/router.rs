//! Fragment routing.
//!
//! The current view is never stored: it is recomputed from the fragment on
//! every change by matching it against the slugs of the current folders.

use crate::store::HierarchyStore;

/// What the main content region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// All top-level folders.
    Root,
    /// The leaves of one top-level folder.
    Inside(String),
}

impl ViewState {
    /// Name of the folder being shown, if any.
    pub fn top(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Inside(name) => Some(name),
        }
    }
}

/// URL-safe identifier for a folder name.
///
/// `" & "` becomes `"-"`, then every remaining space becomes `"-"`. This is
/// not injective ("A & B" and "A-B" share a slug).
pub fn slug(name: &str) -> String {
    name.replace(" & ", "-").replace(' ', "-")
}

/// Link target for a folder tile.
pub fn href_for(name: &str) -> String {
    format!("#{}", slug(name))
}

/// Fragment text without its leading `#`.
pub fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// Resolve a fragment to a view. The first folder in store order whose slug
/// matches wins; anything else (including `""`) is the root.
pub fn resolve(store: &HierarchyStore, fragment: &str) -> ViewState {
    let wanted = strip_hash(fragment);
    if wanted.is_empty() {
        return ViewState::Root;
    }
    store
        .list_top()
        .into_iter()
        .find(|name| slug(name) == wanted)
        .map(|name| ViewState::Inside(name.to_string()))
        .unwrap_or(ViewState::Root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use rstest::rstest;

    #[rstest]
    #[case("NDA & NA", "NDA-NA")]
    #[case("SSC-CGL", "SSC-CGL")]
    #[case("Maths PYQ", "Maths-PYQ")]
    #[case("A & B & C", "A-B-C")]
    #[case("A&B", "A&B")]
    #[case("", "")]
    fn test_slug(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slug(name), expected);
        assert_eq!(slug(name), slug(name));
    }

    #[test]
    fn test_resolve_round_trips_seed_names() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        for name in store.list_top() {
            assert_eq!(
                resolve(&store, &href_for(name)),
                ViewState::Inside(name.to_string())
            );
        }
    }

    #[rstest]
    #[case("")]
    #[case("#")]
    #[case("#nope")]
    #[case("NDA & NA")]
    fn test_resolve_falls_back_to_root(#[case] fragment: &str) {
        let store = HierarchyStore::from_seed(Seed::builtin());
        assert_eq!(resolve(&store, fragment), ViewState::Root);
    }

    #[test]
    fn test_resolve_accepts_bare_slug() {
        let store = HierarchyStore::from_seed(Seed::builtin());
        assert_eq!(
            resolve(&store, "NDA-NA"),
            ViewState::Inside("NDA & NA".to_string())
        );
    }

    #[test]
    fn test_slug_collision_takes_first_in_store_order() {
        let mut store = HierarchyStore::new();
        store.insert_top("A-B", Vec::new());
        store.insert_top("A & B", Vec::new());
        assert_eq!(resolve(&store, "#A-B"), ViewState::Inside("A-B".to_string()));
    }

    #[test]
    fn test_resolve_empty_store() {
        let store = HierarchyStore::new();
        assert_eq!(resolve(&store, "#CDS"), ViewState::Root);
    }
}
