//! Small page helpers: locale formatting, loading placeholders, confirmation.

pub mod confirm;
pub mod format;
pub mod loading;

pub use confirm::confirm_action;
pub use format::{CURRENCY_CODE, FormatError, format_currency, format_date};
pub use loading::{SPINNER_HTML, hide_loading, show_loading};
