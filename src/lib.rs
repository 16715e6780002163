//! Front-end behaviors for the syndic management site, driven against an
//! in-memory page model.
//!
//! The crate owns the interactive pieces of the UI: transient toasts with a
//! timed lifecycle, a JSON request client that turns every failure into an
//! error toast, modal/dropdown/mobile-menu visibility, debounced calls,
//! locale formatting, and the logout flow. Timers run on Tokio; the page is
//! a [`dom::Document`] the host keeps in sync with the real one.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | [`app::SindicUi`] façade: owns the components, routes page events |
//! | [`notify`] | Toast state machine, [`notify::NotificationManager`], flash expiry |
//! | [`net`] | [`net::RequestClient`] failure bridge and [`net::SessionTerminator`] |
//! | [`panels`] | Modal/dropdown visibility, scroll lock, mobile menu |
//! | [`debounce`] | Trailing-edge [`debounce::Debouncer`] |
//! | [`util`] | Currency/date formatting, loading placeholders, confirmation |
//! | [`dom`] | In-memory page: element tree, classes, scroll lock, location |
//! | [`config`] | [`config::UiConfig`] from `SINDIC_*` environment variables |

pub mod app;
pub mod config;
pub mod debounce;
pub mod dom;
pub mod net;
pub mod notify;
pub mod panels;
pub mod util;
