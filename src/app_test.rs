use std::time::Duration;

use super::*;
use crate::dom::{Element, HIDDEN};
use crate::notify::{FLASH_CLASS, NotificationState, Severity, TOAST_CONTAINER_ID};
use crate::panels::Visibility;

/// Layout of a typical page: nav with a dropdown and mobile menu, a flash
/// message, a modal and the toast container.
fn page() -> Document {
    let doc = Document::at("/lots");
    doc.append(None, Element::new("nav", "nav")).unwrap();
    doc.append(Some("nav"), Element::new("user-menu", "div")).unwrap();
    doc.append(Some("user-menu"), Element::new("user-trigger", "button")).unwrap();
    doc.append(Some("user-menu"), Element::new("user-dropdown", "div").with_classes("dropdown-menu hidden"))
        .unwrap();
    doc.append(Some("nav"), Element::new("mobile-menu-button", "button")).unwrap();
    doc.append(Some("mobile-menu-button"), Element::new("menu-icon-open", "svg")).unwrap();
    doc.append(Some("mobile-menu-button"), Element::new("menu-icon-close", "svg").with_classes("hidden")).unwrap();
    doc.append(Some("nav"), Element::new("mobile-menu", "div").with_classes("hidden")).unwrap();
    doc.append(None, Element::new("flash-1", "div").with_classes(FLASH_CLASS)).unwrap();
    doc.append(None, Element::new("main", "main")).unwrap();
    doc.append(None, Element::new("edit-modal", "div").with_classes("hidden")).unwrap();
    doc.append(None, Element::new(TOAST_CONTAINER_ID, "div")).unwrap();
    doc
}

fn ui(doc: &Document) -> SindicUi {
    SindicUi::new(doc.clone(), UiConfig::default()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn on_ready_binds_panels_and_expires_flash() {
    let doc = page();
    let ui = ui(&doc);

    let flashes = ui.on_ready();
    assert_eq!(flashes.len(), 1);
    assert_eq!(ui.panels().visibility("user-dropdown"), Some(Visibility::Hidden));
    assert!(ui.panels().mobile_menu().is_some());
    assert!(!doc.scroll_locked());

    tokio::time::sleep(Duration::from_millis(5301)).await;
    assert!(!doc.exists("flash-1"));
}

#[tokio::test(start_paused = true)]
async fn click_routing_covers_toasts_menu_and_dropdowns() {
    let doc = page();
    let ui = ui(&doc);
    ui.on_ready();

    let toast = ui.notifications().notify("Lot enregistré", Severity::Success).unwrap();
    ui.panels().toggle_dropdown("user-dropdown");
    assert_eq!(ui.handle_click("menu-icon-open").closed_dropdowns, vec!["user-dropdown"]);
    assert_eq!(ui.panels().mobile_menu().unwrap().visibility(), Visibility::Visible);

    let effects = ui.handle_click(&toast.close_button_id());
    assert_eq!(effects.dismissed, Some(toast));
    assert_eq!(ui.notifications().state(toast), Some(NotificationState::Exiting));
    // The close button is outside the mobile menu.
    assert!(doc.has_class("mobile-menu", HIDDEN));
}

#[tokio::test(start_paused = true)]
async fn click_inside_dropdown_container_is_not_outside() {
    let doc = page();
    let ui = ui(&doc);
    ui.on_ready();

    ui.panels().toggle_dropdown("user-dropdown");
    assert_eq!(ui.handle_click("user-trigger"), ClickEffects::default());
    assert_eq!(ui.panels().visible_dropdowns(), vec!["user-dropdown"]);
}

#[tokio::test(start_paused = true)]
async fn modal_locks_scroll_through_facade() {
    let doc = page();
    let ui = ui(&doc);
    ui.panels().open("edit-modal");
    assert!(doc.scroll_locked());
    ui.panels().close("edit-modal");
    assert!(!doc.scroll_locked());
}

#[tokio::test]
async fn new_rejects_bad_base_url() {
    let config = UiConfig { api_base_url: "::".into(), ..UiConfig::default() };
    let Err(err) = SindicUi::new(page(), config) else {
        panic!("expected invalid base URL");
    };
    assert_eq!(err.error_code(), "E_INVALID_URL");
}
