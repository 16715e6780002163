//! Mobile navigation toggle.
//!
//! One trigger button, one menu, and an optional open/close icon pair. The
//! icon pair always mirrors the menu: open-icon shown while the menu is
//! hidden, close-icon shown while it is visible.

#[cfg(test)]
#[path = "mobile_menu_test.rs"]
mod mobile_menu_test;

use crate::dom::{Document, HIDDEN};

use super::controller::Visibility;

/// Element ids the mobile menu binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobileMenuIds {
    pub button: String,
    pub menu: String,
    pub icon_open: String,
    pub icon_close: String,
}

impl Default for MobileMenuIds {
    fn default() -> Self {
        Self {
            button: "mobile-menu-button".to_owned(),
            menu: "mobile-menu".to_owned(),
            icon_open: "menu-icon-open".to_owned(),
            icon_close: "menu-icon-close".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MobileMenu {
    document: Document,
    ids: MobileMenuIds,
}

impl MobileMenu {
    /// Bind to the page. Returns `None` when the button or the menu is
    /// missing; missing icons only disable the icon swap.
    #[must_use]
    pub fn bind(document: Document, ids: MobileMenuIds) -> Option<Self> {
        if !document.exists(&ids.button) || !document.exists(&ids.menu) {
            return None;
        }
        let menu = Self { document, ids };
        menu.sync_icons();
        Some(menu)
    }

    #[must_use]
    pub fn ids(&self) -> &MobileMenuIds {
        &self.ids
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.document.has_class(&self.ids.menu, HIDDEN) { Visibility::Hidden } else { Visibility::Visible }
    }

    /// Flip the menu and swap the icons.
    pub fn toggle(&self) -> Visibility {
        self.document.toggle_class(&self.ids.menu, HIDDEN);
        self.sync_icons();
        self.visibility()
    }

    /// Route a document click. Returns `true` if the click changed the menu.
    pub fn handle_click(&self, target: &str) -> bool {
        if self.document.contains(&self.ids.button, target) {
            self.toggle();
            return true;
        }
        if self.document.contains(&self.ids.menu, target) || self.visibility() == Visibility::Hidden {
            return false;
        }
        self.document.add_class(&self.ids.menu, HIDDEN);
        self.sync_icons();
        true
    }

    fn sync_icons(&self) {
        let ids = &self.ids;
        if !self.document.exists(&ids.icon_open) || !self.document.exists(&ids.icon_close) {
            return;
        }
        let (show, hide) = match self.visibility() {
            Visibility::Hidden => (&ids.icon_open, &ids.icon_close),
            Visibility::Visible => (&ids.icon_close, &ids.icon_open),
        };
        self.document.remove_class(show, HIDDEN);
        self.document.add_class(hide, HIDDEN);
    }
}
