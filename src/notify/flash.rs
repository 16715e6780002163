//! Expiry of server-rendered flash messages.
//!
//! Flash messages arrive in the page already rendered. They follow the same
//! two-phase timing as toasts: slide-out class after the linger interval,
//! removal once the exit animation has run.

#[cfg(test)]
#[path = "flash_test.rs"]
mod flash_test;

use tokio::task::JoinHandle;
use tracing::debug;

use super::manager::ToastTiming;
use super::notification::SLIDE_OUT;
use crate::dom::Document;

/// Class marking a server-rendered flash message.
pub const FLASH_CLASS: &str = "flash-message";

/// Schedule every flash message currently in `document` for removal.
pub fn schedule_flash_expiry(document: &Document, timing: ToastTiming) -> Vec<JoinHandle<()>> {
    document
        .ids_with_class(FLASH_CLASS)
        .into_iter()
        .map(|id| {
            let document = document.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timing.linger).await;
                if !document.add_class(&id, SLIDE_OUT).is_applied() {
                    return;
                }
                tokio::time::sleep(timing.exit).await;
                document.remove(&id);
                debug!(%id, "flash message expired");
            })
        })
        .collect()
}
