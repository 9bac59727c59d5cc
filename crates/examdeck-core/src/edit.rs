//! Copy, cut, delete and paste against the hierarchy store.

use tracing::{debug, info, warn};

use crate::clipboard::{Clipboard, ClipboardEntry, ClipboardMode, Level, Payload};
use crate::context_menu::{ContextTarget, MenuCommand};
use crate::error::EditError;
use crate::prompt::Prompt;
use crate::store::{HierarchyStore, LeafNode};

/// Appended to a pasted name until it no longer clashes with a sibling.
pub const COPY_SUFFIX: &str = " (Copy)";

/// Notice shown when a paste would cross hierarchy levels.
pub const PASTE_REJECTED: &str =
    "Cannot paste here. Folders must be pasted in a container of the same type.";

pub fn delete_question(name: &str) -> String {
    format!("Are you sure you want to delete \"{name}\"?")
}

/// Append [`COPY_SUFFIX`] to `desired` until it is not among `siblings`.
pub fn disambiguate(desired: &str, siblings: &[&str]) -> String {
    let mut name = desired.to_string();
    while siblings.contains(&name.as_str()) {
        name.push_str(COPY_SUFFIX);
    }
    name
}

/// What a successful command did, for status messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Captured { mode: ClipboardMode, name: String },
    Deleted { name: String },
    /// The user declined the confirmation.
    Kept { name: String },
    Pasted { name: String, moved: bool },
}

/// Applies edit commands to a store and clipboard it borrows.
pub struct EditController<'a> {
    store: &'a mut HierarchyStore,
    clipboard: &'a mut Clipboard,
}

impl<'a> EditController<'a> {
    pub fn new(store: &'a mut HierarchyStore, clipboard: &'a mut Clipboard) -> Self {
        Self { store, clipboard }
    }

    /// Dispatch a menu command.
    pub fn apply(
        &mut self,
        command: MenuCommand,
        target: &ContextTarget,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, EditError> {
        match command {
            MenuCommand::Copy => self.copy(target),
            MenuCommand::Cut => self.cut(target),
            MenuCommand::Delete => self.delete(target, prompt),
            MenuCommand::Paste => self.paste(target, prompt),
        }
    }

    pub fn copy(&mut self, target: &ContextTarget) -> Result<EditOutcome, EditError> {
        self.capture(target, ClipboardMode::Copy)
    }

    /// Stage a move. The source stays in place until the paste commits.
    pub fn cut(&mut self, target: &ContextTarget) -> Result<EditOutcome, EditError> {
        self.capture(target, ClipboardMode::Cut)
    }

    fn capture(
        &mut self,
        target: &ContextTarget,
        mode: ClipboardMode,
    ) -> Result<EditOutcome, EditError> {
        let name = target.key.as_deref().ok_or(EditError::MissingTarget)?;
        let payload = match target.parent_key.as_deref() {
            Some(parent) => {
                let leaf = self
                    .store
                    .get_leaf(parent, name)
                    .map_err(|_| EditError::MissingTarget)?;
                Payload::Leaf(leaf.clone())
            }
            None => {
                let top = self.store.get_top(name).ok_or(EditError::MissingTarget)?;
                Payload::from_top(top)
            }
        };

        info!(mode = mode.label(), name, parent = ?target.parent_key, "clipboard set");
        self.clipboard.set(ClipboardEntry {
            mode,
            payload,
            source_name: name.to_string(),
            source_parent: target.parent_key.clone(),
        });
        Ok(EditOutcome::Captured {
            mode,
            name: name.to_string(),
        })
    }

    /// Remove the targeted folder after the user confirms. The clipboard is
    /// left alone, so a pending cut of the removed folder still pastes.
    pub fn delete(
        &mut self,
        target: &ContextTarget,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, EditError> {
        let name = target.key.as_deref().ok_or(EditError::MissingTarget)?;
        let exists = match target.parent_key.as_deref() {
            Some(parent) => self.store.contains_leaf(parent, name),
            None => self.store.contains_top(name),
        };
        if !exists {
            warn!(name, parent = ?target.parent_key, "delete target no longer exists");
            return Err(EditError::MissingTarget);
        }

        if !prompt.confirm(&delete_question(name)) {
            debug!(name, "delete declined");
            return Ok(EditOutcome::Kept {
                name: name.to_string(),
            });
        }

        match target.parent_key.as_deref() {
            Some(parent) => {
                self.store.delete_leaf(parent, name)?;
            }
            None => {
                self.store.delete_top(name)?;
            }
        }
        info!(name, parent = ?target.parent_key, "deleted");
        Ok(EditOutcome::Deleted {
            name: name.to_string(),
        })
    }

    /// Paste the clipboard into the container described by `target.parent_key`.
    pub fn paste(
        &mut self,
        target: &ContextTarget,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, EditError> {
        let entry = self
            .clipboard
            .entry()
            .cloned()
            .ok_or(EditError::EmptyClipboard)?;
        let destination = target.parent_key.as_deref();
        let destination_level = Level::of_parent(destination);

        if entry.level() != destination_level {
            warn!(
                source = entry.level().label(),
                destination = destination_level.label(),
                "paste rejected"
            );
            prompt.notify(PASTE_REJECTED);
            return Err(EditError::InvalidPaste {
                source_level: entry.level().label(),
                destination_level: destination_level.label(),
            });
        }

        let siblings = self
            .store
            .sibling_names(destination)
            .map_err(|_| EditError::MissingTarget)?;
        let name = disambiguate(entry.desired_name(), &siblings);
        let moved = entry.mode == ClipboardMode::Cut;
        // Checked before inserting: the pasted entry may take the source's name.
        let source_present = match entry.source_parent.as_deref() {
            Some(parent) => self.store.contains_leaf(parent, &entry.source_name),
            None => self.store.contains_top(&entry.source_name),
        };

        match (&entry.payload, destination) {
            (Payload::Top(leaves), None) => {
                self.store.insert_top(name.clone(), leaves.clone());
            }
            (Payload::Leaf(leaf), Some(parent)) => {
                self.store
                    .insert_leaf(parent, LeafNode::new(name.clone(), leaf.url.clone()))?;
            }
            _ => return Err(EditError::MissingTarget),
        }

        if moved && source_present {
            match entry.source_parent.as_deref() {
                Some(parent) => {
                    self.store.delete_leaf(parent, &entry.source_name)?;
                }
                None => {
                    self.store.delete_top(&entry.source_name)?;
                }
            }
        } else if moved {
            debug!(source = %entry.source_name, "cut source already gone");
        }

        self.clipboard.clear();
        info!(name = %name, parent = ?destination, moved, "pasted");
        Ok(EditOutcome::Pasted { name, moved })
    }
}

// ── Tests ────────────────────────────────────────────────────────────
