use tracing::debug;

use crate::router::strip_hash;

/// The address fragment and its back history, as a browser tab keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    fragment: String,
    history: Vec<String>,
}

/// `"CDS"`, `"#CDS"` → `"#CDS"`; `""`, `"#"` → `""`.
pub fn normalize(fragment: &str) -> String {
    let bare = strip_hash(fragment.trim());
    if bare.is_empty() {
        String::new()
    } else {
        format!("#{bare}")
    }
}

impl Location {
    pub fn new(initial: &str) -> Self {
        Self {
            fragment: normalize(initial),
            history: Vec::new(),
        }
    }

    /// Current fragment including the `#`, or `""`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Go to a new fragment, pushing the current one onto the history.
    /// Returns `false` (and records nothing) if the fragment is unchanged.
    pub fn navigate(&mut self, fragment: &str) -> bool {
        let next = normalize(fragment);
        if next == self.fragment {
            return false;
        }
        debug!(from = %self.fragment, to = %next, "navigate");
        let previous = std::mem::replace(&mut self.fragment, next);
        self.history.push(previous);
        true
    }

    /// Change the fragment without adding a history entry.
    pub fn replace(&mut self, fragment: &str) {
        self.fragment = normalize(fragment);
    }

    /// Step back one entry. Returns `false` when there is no history.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!(from = %self.fragment, to = %previous, "back");
                self.fragment = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("CDS"), "#CDS");
        assert_eq!(normalize("#CDS"), "#CDS");
        assert_eq!(normalize("#"), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  #JEE "), "#JEE");
    }

    #[test]
    fn test_navigate_and_back() {
        let mut location = Location::new("");
        assert!(!location.can_go_back());

        assert!(location.navigate("#CDS"));
        assert!(location.navigate(""));
        assert!(location.navigate("#JEE"));
        assert_eq!(location.fragment(), "#JEE");

        assert!(location.back());
        assert_eq!(location.fragment(), "");
        assert!(location.back());
        assert_eq!(location.fragment(), "#CDS");
        assert!(location.back());
        assert_eq!(location.fragment(), "");
        assert!(!location.back());
    }

    #[test]
    fn test_same_fragment_adds_no_history() {
        let mut location = Location::new("#CDS");
        assert!(!location.navigate("CDS"));
        assert!(!location.can_go_back());
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let mut location = Location::new("");
        location.navigate("#Gone");
        location.replace("");
        assert_eq!(location.fragment(), "");
        assert!(location.back());
        assert_eq!(location.fragment(), "");
        assert!(!location.can_go_back());
    }
}
