//! Guard an action behind a confirmation prompt.

#[cfg(test)]
#[path = "confirm_test.rs"]
mod confirm_test;

use tracing::debug;

use crate::dom::Document;

/// Ask the page to confirm `message`; run `action` only if accepted.
/// Returns whether the action ran.
pub fn confirm_action(document: &Document, message: &str, action: impl FnOnce()) -> bool {
    if !document.confirm(message) {
        debug!(%message, "action declined");
        return false;
    }
    action();
    true
}
