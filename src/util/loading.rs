//! Loading placeholders for content areas.

#[cfg(test)]
#[path = "loading_test.rs"]
mod loading_test;

use crate::dom::{Document, Outcome};

pub const SPINNER_HTML: &str = r#"<div class="flex justify-center items-center py-8"><div class="loading-spinner border-indigo-600"></div></div>"#;

/// Replace the element's content with the spinner.
pub fn show_loading(document: &Document, id: &str) -> Outcome {
    document.set_content(id, SPINNER_HTML)
}

/// Replace the spinner with the loaded content.
pub fn hide_loading(document: &Document, id: &str, content: &str) -> Outcome {
    document.set_content(id, content)
}
