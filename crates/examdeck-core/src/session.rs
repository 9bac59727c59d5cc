//! The single owner of application state.
//!
//! Every input goes through [`Session`], which mutates what it owns and then
//! re-derives the view from the fragment and re-renders in one step.

use tracing::debug;

use crate::clipboard::Clipboard;
use crate::context_menu::{ContextMenu, ContextTarget, Hit, MenuCommand};
use crate::edit::{EditController, EditOutcome};
use crate::error::EditError;
use crate::location::Location;
use crate::prompt::Prompt;
use crate::router::{self, ViewState};
use crate::store::HierarchyStore;
use crate::view::{self, Link, Rendered, ViewTree};

/// What activating a link asks the frontend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// The fragment changed and the view was re-rendered.
    Navigated,
    /// Open this external reference in a new context.
    OpenExternal(String),
    /// Nothing to do (unknown tile, or already there).
    Ignored,
}

pub struct Session {
    store: HierarchyStore,
    clipboard: Clipboard,
    location: Location,
    /// Last right-clicked target; survives menu dismissal.
    context: Option<ContextTarget>,
    menu: Option<ContextMenu>,
    view: ViewState,
    tree: ViewTree,
}

impl Session {
    pub fn new(store: HierarchyStore, initial_fragment: &str) -> Self {
        let clipboard = Clipboard::new();
        let tree = view::render_root(&store.list_top(), &clipboard);
        let mut session = Self {
            store,
            clipboard,
            location: Location::new(initial_fragment),
            context: None,
            menu: None,
            view: ViewState::Root,
            tree,
        };
        session.refresh();
        session
    }

    pub fn store(&self) -> &HierarchyStore {
        &self.store
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The most recent render.
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    pub fn context_target(&self) -> Option<&ContextTarget> {
        self.context.as_ref()
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Set the fragment (as if typed in the address bar) and re-render.
    pub fn navigate(&mut self, fragment: &str) -> bool {
        let changed = self.location.navigate(fragment);
        self.refresh();
        changed
    }

    /// One step back in fragment history.
    pub fn back(&mut self) -> bool {
        let moved = self.location.back();
        if moved {
            self.refresh();
        }
        moved
    }

    pub fn activate(&mut self, link: &Link) -> Activation {
        match link {
            Link::Fragment(fragment) => {
                if self.navigate(fragment) {
                    Activation::Navigated
                } else {
                    Activation::Ignored
                }
            }
            Link::External { url, .. } => Activation::OpenExternal(url.clone()),
        }
    }

    /// Follow the link of the named tile in the current view.
    pub fn activate_tile(&mut self, name: &str) -> Activation {
        match self.tree.tile(name).map(|t| t.link.clone()) {
            Some(link) => self.activate(&link),
            None => Activation::Ignored,
        }
    }

    /// Follow the header's back control. Only present inside a folder.
    pub fn activate_back_control(&mut self) -> Activation {
        match &self.tree {
            ViewTree::Inside { back, .. } => {
                let back = back.clone();
                self.activate(&back)
            }
            ViewTree::Root { .. } => Activation::Ignored,
        }
    }

    // ── Context menu ─────────────────────────────────────────────────

    /// Handle a right-click. Returns the menu when the click was handled.
    pub fn open_context_menu(&mut self, hit: &Hit) -> Option<&ContextMenu> {
        let menu = ContextMenu::open(hit, &self.view, &self.clipboard)?;
        self.context = Some(menu.target.clone());
        self.menu = Some(menu);
        self.menu.as_ref()
    }

    /// Close the menu without doing anything.
    pub fn dismiss_menu(&mut self) {
        self.menu = None;
    }

    /// Run a command against the last captured context target.
    pub fn choose(
        &mut self,
        command: MenuCommand,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, EditError> {
        self.menu = None;
        let target = self.context.clone().ok_or(EditError::MissingTarget)?;
        self.run(command, &target, prompt)
    }

    /// Run a command against an explicit target, as keyboard shortcuts do.
    pub fn run(
        &mut self,
        command: MenuCommand,
        target: &ContextTarget,
        prompt: &mut dyn Prompt,
    ) -> Result<EditOutcome, EditError> {
        self.menu = None;
        self.context = Some(target.clone());
        let outcome =
            EditController::new(&mut self.store, &mut self.clipboard).apply(command, target, prompt)?;
        self.refresh();
        Ok(outcome)
    }

    /// Drop whatever is on the clipboard (abandons a pending cut).
    pub fn clear_clipboard(&mut self) {
        if self.clipboard.clear().is_some() {
            self.refresh();
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn refresh(&mut self) {
        self.view = router::resolve(&self.store, self.location.fragment());
        self.render_view();
    }

    /// Render `self.view`. A view naming a folder the store no longer has
    /// falls back to the root and clears the fragment; `refresh` resolves
    /// first, so only a view held across a store change gets here.
    fn render_view(&mut self) {
        match view::render(&self.store, &self.view, &self.clipboard) {
            Rendered::View(tree) => self.tree = tree,
            Rendered::Redirect => {
                debug!(fragment = %self.location.fragment(), "unknown folder, clearing fragment");
                self.location.replace("");
                self.view = ViewState::Root;
                self.tree = view::render_root(&self.store.list_top(), &self.clipboard);
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
