use super::*;
use crate::dom::Element;

/// Two dropdowns, each inside its own trigger container, plus a modal.
fn page() -> Document {
    let doc = Document::new();
    doc.append(None, Element::new("header", "header")).unwrap();
    for name in ["a", "b"] {
        let wrap = format!("wrap-{name}");
        doc.append(Some("header"), Element::new(wrap.clone(), "div")).unwrap();
        doc.append(Some(&wrap), Element::new(format!("trigger-{name}"), "button")).unwrap();
        doc.append(Some(&wrap), Element::new(format!("dropdown-{name}"), "div").with_classes("dropdown-menu hidden"))
            .unwrap();
        doc.append(Some(&format!("dropdown-{name}")), Element::new(format!("item-{name}"), "a")).unwrap();
    }
    doc.append(None, Element::new("main", "main")).unwrap();
    doc.append(None, Element::new("confirm-modal", "div").with_classes("hidden fixed inset-0")).unwrap();
    doc.append(None, Element::new("other-modal", "div").with_classes("hidden")).unwrap();
    doc
}

fn controller(doc: &Document) -> VisibilityController {
    let panels = VisibilityController::new(doc.clone());
    assert_eq!(panels.bind_dropdowns(), 2);
    panels
}

// =============================================================
// Initialization
// =============================================================

#[test]
fn starts_hidden_and_unlocked() {
    let doc = page();
    let panels = controller(&doc);
    assert_eq!(panels.visibility("dropdown-a"), Some(Visibility::Hidden));
    assert_eq!(panels.panel("dropdown-b").unwrap().kind, PanelKind::Dropdown);
    assert!(panels.visible_dropdowns().is_empty());
    assert!(!doc.scroll_locked());
}

#[test]
fn register_hides_and_reports_missing() {
    let doc = page();
    doc.remove_class("confirm-modal", HIDDEN);
    let panels = controller(&doc);
    assert_eq!(panels.register("confirm-modal", PanelKind::Modal), Outcome::Applied);
    assert!(doc.has_class("confirm-modal", HIDDEN));
    assert_eq!(panels.register("ghost", PanelKind::Modal), Outcome::MissingTarget);
    assert_eq!(panels.visibility("ghost"), None);
}

// =============================================================
// Modals
// =============================================================

#[test]
fn modal_open_locks_scroll_and_close_restores() {
    let doc = page();
    let panels = controller(&doc);

    assert_eq!(panels.open("confirm-modal"), Outcome::Applied);
    assert!(!doc.has_class("confirm-modal", HIDDEN));
    assert_eq!(doc.overflow(), Overflow::Hidden);

    assert_eq!(panels.close("confirm-modal"), Outcome::Applied);
    assert!(doc.has_class("confirm-modal", HIDDEN));
    assert_eq!(doc.overflow(), Overflow::Auto);
}

#[test]
fn scroll_stays_locked_while_any_modal_is_open() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("confirm-modal");
    panels.open("other-modal");
    panels.close("confirm-modal");
    assert!(doc.scroll_locked());
    panels.close("other-modal");
    assert!(!doc.scroll_locked());
}

#[test]
fn open_and_close_missing_target_are_noops() {
    let doc = page();
    let panels = controller(&doc);
    assert_eq!(panels.open("nope"), Outcome::MissingTarget);
    assert_eq!(panels.close("nope"), Outcome::MissingTarget);
    assert!(!doc.scroll_locked());
}

#[test]
fn removed_modal_releases_scroll_lock_on_next_call() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("confirm-modal");
    doc.remove("confirm-modal");
    assert_eq!(panels.close("confirm-modal"), Outcome::MissingTarget);
    assert!(!doc.scroll_locked());
}

#[test]
fn dropdown_open_does_not_lock_scroll() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("dropdown-a");
    assert_eq!(panels.visibility("dropdown-a"), Some(Visibility::Visible));
    assert!(!doc.scroll_locked());
}

// =============================================================
// Dropdowns
// =============================================================

#[test]
fn toggle_dropdown_flips_only_that_dropdown() {
    let doc = page();
    let panels = controller(&doc);

    assert_eq!(panels.toggle_dropdown("dropdown-a"), Outcome::Applied);
    assert!(!doc.has_class("dropdown-a", HIDDEN));
    assert_eq!(panels.toggle_dropdown("dropdown-b"), Outcome::Applied);
    // No implicit mutual exclusion.
    assert_eq!(panels.visible_dropdowns(), vec!["dropdown-a", "dropdown-b"]);

    panels.toggle_dropdown("dropdown-a");
    assert_eq!(panels.visible_dropdowns(), vec!["dropdown-b"]);
    assert!(doc.has_class("dropdown-a", HIDDEN));
    assert_eq!(panels.toggle_dropdown("missing"), Outcome::MissingTarget);
}

#[test]
fn outside_click_closes_every_open_dropdown() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("dropdown-a");
    panels.open("dropdown-b");

    let closed = panels.handle_click("main");
    assert_eq!(closed, vec!["dropdown-a", "dropdown-b"]);
    assert!(panels.visible_dropdowns().is_empty());
    assert!(doc.has_class("dropdown-a", HIDDEN));
    assert!(doc.has_class("dropdown-b", HIDDEN));
}

#[test]
fn click_inside_trigger_container_keeps_dropdown_open() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("dropdown-a");

    assert!(panels.handle_click("trigger-a").is_empty());
    assert!(panels.handle_click("item-a").is_empty());
    assert_eq!(panels.visible_dropdowns(), vec!["dropdown-a"]);
}

#[test]
fn clicking_another_trigger_closes_only_the_outside_dropdown() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("dropdown-a");

    // Trigger handler runs first, then the document observer.
    panels.toggle_dropdown("dropdown-b");
    assert_eq!(panels.visible_dropdowns(), vec!["dropdown-a", "dropdown-b"]);
    let closed = panels.handle_click("trigger-b");
    assert_eq!(closed, vec!["dropdown-a"]);
    assert_eq!(panels.visible_dropdowns(), vec!["dropdown-b"]);
}

#[test]
fn unbound_dropdown_is_classified_by_its_class() {
    let doc = page();
    let panels = VisibilityController::new(doc.clone());

    assert_eq!(panels.open("dropdown-a"), Outcome::Applied);
    assert_eq!(panels.panel("dropdown-a").unwrap().kind, PanelKind::Dropdown);
    assert!(!doc.scroll_locked());

    assert_eq!(panels.handle_click("main"), vec!["dropdown-a"]);
    assert!(doc.has_class("dropdown-a", HIDDEN));
}

#[test]
fn toggling_a_modal_keeps_it_a_modal() {
    let doc = page();
    let panels = controller(&doc);

    assert_eq!(panels.toggle_dropdown("confirm-modal"), Outcome::Applied);
    assert_eq!(panels.panel("confirm-modal").unwrap().kind, PanelKind::Modal);
    assert!(doc.scroll_locked());
    assert!(panels.visible_dropdowns().is_empty());
}

#[test]
fn click_on_unknown_target_counts_as_outside() {
    let doc = page();
    let panels = controller(&doc);
    panels.open("dropdown-a");
    assert_eq!(panels.handle_click("not-in-page"), vec!["dropdown-a"]);
}

// =============================================================
// Mobile menu wiring
// =============================================================

#[test]
fn mobile_menu_binding_requires_button_and_menu() {
    let doc = page();
    let panels = controller(&doc);
    assert_eq!(panels.bind_mobile_menu(MobileMenuIds::default()), Outcome::MissingTarget);
    assert!(panels.mobile_menu().is_none());

    doc.append(Some("header"), Element::new("mobile-menu-button", "button")).unwrap();
    doc.append(Some("header"), Element::new("mobile-menu", "nav").with_classes("hidden")).unwrap();
    assert_eq!(panels.bind_mobile_menu(MobileMenuIds::default()), Outcome::Applied);

    panels.handle_click("mobile-menu-button");
    assert_eq!(panels.mobile_menu().unwrap().visibility(), Visibility::Visible);
    panels.handle_click("main");
    assert_eq!(panels.mobile_menu().unwrap().visibility(), Visibility::Hidden);
}
