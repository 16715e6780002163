//! Modal, dropdown and mobile-menu visibility.

pub mod controller;
pub mod mobile_menu;

pub use controller::{DROPDOWN_CLASS, Panel, PanelKind, Visibility, VisibilityController};
pub use mobile_menu::{MobileMenu, MobileMenuIds};
