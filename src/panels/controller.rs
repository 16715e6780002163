//! Modal and dropdown visibility.
//!
//! DESIGN
//! ======
//! Panel state lives here, not in the page: every panel starts hidden and
//! only `open`, `close`, `toggle_dropdown` and the click observer change it.
//! The page is updated to match on each change (`hidden` class, body scroll
//! lock for modals).
//!
//! The scroll lock is held while any modal is visible. Closing one of two
//! open modals keeps the page locked.
//!
//! LIMITATIONS
//! ===========
//! "At most one open dropdown" is enforced reactively. Opening a second
//! dropdown leaves the first open; the next click outside a dropdown's
//! trigger container closes it.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::mobile_menu::{MobileMenu, MobileMenuIds};
use crate::dom::{Document, HIDDEN, Outcome, Overflow};

/// Class marking dropdown menus bound by [`VisibilityController::bind_dropdowns`].
pub const DROPDOWN_CLASS: &str = "dropdown-menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Modal,
    Dropdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: String,
    pub kind: PanelKind,
    pub visibility: Visibility,
}

#[derive(Clone)]
pub struct VisibilityController {
    document: Document,
    inner: Arc<Mutex<ControllerInner>>,
}

#[derive(Default)]
struct ControllerInner {
    panels: HashMap<String, Panel>,
    mobile_menu: Option<MobileMenu>,
}

impl VisibilityController {
    #[must_use]
    pub fn new(document: Document) -> Self {
        document.set_overflow(Overflow::Auto);
        Self { document, inner: Arc::new(Mutex::new(ControllerInner::default())) }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Bind an existing element as a panel, hidden.
    pub fn register(&self, id: &str, kind: PanelKind) -> Outcome {
        if !self.document.exists(id) {
            return Outcome::MissingTarget;
        }
        self.document.add_class(id, HIDDEN);
        let panel = Panel { id: id.to_owned(), kind, visibility: Visibility::Hidden };
        self.lock().panels.insert(id.to_owned(), panel);
        self.sync_scroll_lock();
        Outcome::Applied
    }

    /// Register every `.dropdown-menu` element in the page as a dropdown.
    pub fn bind_dropdowns(&self) -> usize {
        let ids = self.document.ids_with_class(DROPDOWN_CLASS);
        for id in &ids {
            self.register(id, PanelKind::Dropdown);
        }
        ids.len()
    }

    /// Bind the mobile menu. Missing button or menu leaves it unbound.
    pub fn bind_mobile_menu(&self, ids: MobileMenuIds) -> Outcome {
        match MobileMenu::bind(self.document.clone(), ids) {
            Some(menu) => {
                self.lock().mobile_menu = Some(menu);
                Outcome::Applied
            }
            None => Outcome::MissingTarget,
        }
    }

    #[must_use]
    pub fn mobile_menu(&self) -> Option<MobileMenu> {
        self.lock().mobile_menu.clone()
    }

    /// Show a panel. An unregistered element is bound first, as a dropdown
    /// if it carries [`DROPDOWN_CLASS`] and as a modal otherwise.
    pub fn open(&self, id: &str) -> Outcome {
        self.set_visibility(id, Visibility::Visible)
    }

    /// Hide a panel. Unregistered elements are bound as in [`open`](Self::open).
    pub fn close(&self, id: &str) -> Outcome {
        self.set_visibility(id, Visibility::Hidden)
    }

    /// Flip one panel. Other open dropdowns are left alone.
    pub fn toggle_dropdown(&self, id: &str) -> Outcome {
        let next = match self.visibility(id) {
            Some(Visibility::Visible) => Visibility::Hidden,
            _ => Visibility::Visible,
        };
        self.set_visibility(id, next)
    }

    #[must_use]
    pub fn visibility(&self, id: &str) -> Option<Visibility> {
        self.lock().panels.get(id).map(|p| p.visibility)
    }

    #[must_use]
    pub fn panel(&self, id: &str) -> Option<Panel> {
        self.lock().panels.get(id).cloned()
    }

    /// Ids of the visible dropdowns, sorted.
    #[must_use]
    pub fn visible_dropdowns(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .lock()
            .panels
            .values()
            .filter(|p| p.kind == PanelKind::Dropdown && p.visibility == Visibility::Visible)
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Document-level click observer.
    ///
    /// Routes the click to the mobile menu, then closes every visible
    /// dropdown whose trigger container (its parent element) does not
    /// contain `target`. Returns the ids of the dropdowns it closed.
    pub fn handle_click(&self, target: &str) -> Vec<String> {
        if let Some(menu) = self.mobile_menu() {
            menu.handle_click(target);
        }

        let mut closed = Vec::new();
        for id in self.visible_dropdowns() {
            let container = self.document.parent(&id).unwrap_or_else(|| id.clone());
            if !self.document.contains(&container, target) {
                self.close(&id);
                closed.push(id);
            }
        }
        closed
    }

    fn set_visibility(&self, id: &str, visibility: Visibility) -> Outcome {
        if !self.document.exists(id) {
            debug!(%id, "panel target missing");
            self.lock().panels.remove(id);
            self.sync_scroll_lock();
            return Outcome::MissingTarget;
        }

        let kind = if self.document.has_class(id, DROPDOWN_CLASS) { PanelKind::Dropdown } else { PanelKind::Modal };
        {
            let mut inner = self.lock();
            let panel = inner
                .panels
                .entry(id.to_owned())
                .or_insert_with(|| Panel { id: id.to_owned(), kind, visibility });
            panel.visibility = visibility;
        }

        match visibility {
            Visibility::Visible => self.document.remove_class(id, HIDDEN),
            Visibility::Hidden => self.document.add_class(id, HIDDEN),
        };
        self.sync_scroll_lock();
        Outcome::Applied
    }

    fn sync_scroll_lock(&self) {
        let locked = self
            .lock()
            .panels
            .values()
            .any(|p| p.kind == PanelKind::Modal && p.visibility == Visibility::Visible);
        self.document.set_overflow(if locked { Overflow::Hidden } else { Overflow::Auto });
    }
}
