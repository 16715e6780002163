//! Toast lifecycle management.
//!
//! DESIGN
//! ======
//! Each notification is a small state machine (`entering → visible →
//! exiting → removed`) with one owned timer per timed phase:
//!
//! - the linger timer (default 5000 ms) moves a visible toast to `exiting`
//!   and swaps its slide-in class for slide-out;
//! - the exit timer (default 300 ms) detaches the element and retires the
//!   notification.
//!
//! `dismiss` aborts the linger timer and enters `exiting` directly. Every
//! transition re-checks the current state under the lock, so a timer firing
//! against an already-exiting or removed toast does nothing.
//!
//! Live notifications are kept in creation order, matching the order of
//! their elements in the container. Retired ids are not stored: any issued
//! id that is no longer live is `Removed`.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::notification::{
    CLOSE_BUTTON_CLASSES, Notification, NotificationId, NotificationState, SLIDE_IN, SLIDE_OUT, Severity,
    SeverityError,
};
use crate::dom::{Document, Element};

/// Id of the container toasts are appended to.
pub const TOAST_CONTAINER_ID: &str = "toast-container";

const DEFAULT_LINGER_MS: u64 = 5000;
const DEFAULT_EXIT_MS: u64 = 300;
const EVENT_CAPACITY: usize = 64;

/// Durations of the two timed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Time a toast stays on screen before its exit animation starts.
    pub linger: Duration,
    /// Length of the exit animation; the element is removed when it ends.
    pub exit: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self { linger: Duration::from_millis(DEFAULT_LINGER_MS), exit: Duration::from_millis(DEFAULT_EXIT_MS) }
    }
}

/// A state change, published to subscribers as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub id: NotificationId,
    pub state: NotificationState,
    pub at: Instant,
}

// =============================================================================
// MANAGER
// =============================================================================

#[derive(Clone)]
pub struct NotificationManager {
    document: Document,
    timing: ToastTiming,
    inner: Arc<Mutex<ManagerInner>>,
    events: broadcast::Sender<Transition>,
}

struct ManagerInner {
    next_id: u64,
    /// Live notifications in creation order.
    live: Vec<Entry>,
}

struct Entry {
    notification: Notification,
    linger: Option<JoinHandle<()>>,
}

impl NotificationManager {
    #[must_use]
    pub fn new(document: Document, timing: ToastTiming) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { document, timing, inner: Arc::new(Mutex::new(ManagerInner { next_id: 0, live: Vec::new() })), events }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManagerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn timing(&self) -> ToastTiming {
        self.timing
    }

    /// Receive every transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Transition> {
        self.events.subscribe()
    }

    /// Show `message` as a toast and start its lifecycle timers.
    ///
    /// Returns `None` without doing anything when the page has no toast
    /// container. Must be called from within a Tokio runtime.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> Option<NotificationId> {
        if !self.document.exists(TOAST_CONTAINER_ID) {
            debug!(container = TOAST_CONTAINER_ID, "toast container missing, notification skipped");
            return None;
        }

        let id = {
            let mut inner = self.lock();
            let id = NotificationId(inner.next_id);
            let mut notification = Notification::new(id, message.into(), severity);
            if let Err(e) = self.render(&notification) {
                warn!(error = %e, %id, "toast render failed");
                return None;
            }
            inner.next_id += 1;

            self.publish(id, NotificationState::Entering);
            if let Some(state) = notification.advance() {
                self.publish(id, state);
            }
            inner.live.push(Entry { notification, linger: None });
            id
        };

        let manager = self.clone();
        let deadline = Instant::now() + self.timing.linger;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            manager.begin_exit(id, false);
        });

        let mut inner = self.lock();
        match inner.live.iter_mut().find(|e| e.notification.id() == id) {
            Some(entry) if entry.notification.state().is_dismissable() => entry.linger = Some(handle),
            _ => handle.abort(),
        }
        Some(id)
    }

    /// Like [`notify`](Self::notify), with the severity given by name.
    ///
    /// # Errors
    ///
    /// Fails before rendering anything if the severity name is unknown.
    pub fn notify_named(
        &self,
        message: impl Into<String>,
        severity: &str,
    ) -> Result<Option<NotificationId>, SeverityError> {
        let severity = severity.parse::<Severity>()?;
        Ok(self.notify(message, severity))
    }

    /// Start the exit animation now. Returns `false` if the toast was already
    /// exiting or removed.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.begin_exit(id, true)
    }

    /// Dismiss the toast owning `target` if `target` is a toast close button.
    pub fn handle_close_click(&self, target: &str) -> Option<NotificationId> {
        if !self.document.has_class(target, "toast-close") {
            return None;
        }
        let id = self
            .lock()
            .live
            .iter()
            .map(|e| e.notification.id())
            .find(|id| self.document.contains(&id.element_id(), target))?;
        self.dismiss(id).then_some(id)
    }

    /// Current lifecycle state; `None` for ids this manager never issued.
    #[must_use]
    pub fn state(&self, id: NotificationId) -> Option<NotificationState> {
        let inner = self.lock();
        if let Some(entry) = inner.live.iter().find(|e| e.notification.id() == id) {
            return Some(entry.notification.state());
        }
        (id.0 < inner.next_id).then_some(NotificationState::Removed)
    }

    /// Snapshot of the live notifications, oldest first.
    #[must_use]
    pub fn live(&self) -> Vec<Notification> {
        self.lock().live.iter().map(|e| e.notification.clone()).collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn begin_exit(&self, id: NotificationId, cancel_linger: bool) -> bool {
        {
            let mut inner = self.lock();
            let Some(entry) = inner.live.iter_mut().find(|e| e.notification.id() == id) else {
                return false;
            };
            if !entry.notification.state().is_dismissable() {
                return false;
            }
            while entry.notification.state() < NotificationState::Exiting {
                match entry.notification.advance() {
                    Some(state) => self.publish(id, state),
                    None => break,
                }
            }
            if let Some(linger) = entry.linger.take() {
                if cancel_linger {
                    linger.abort();
                }
            }
        }

        self.document.replace_class(&id.element_id(), SLIDE_IN, SLIDE_OUT);
        debug!(%id, "toast exiting");

        let manager = self.clone();
        let deadline = Instant::now() + self.timing.exit;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            manager.finish_removal(id);
        });
        true
    }

    fn finish_removal(&self, id: NotificationId) {
        let mut inner = self.lock();
        let Some(pos) = inner.live.iter().position(|e| e.notification.id() == id) else {
            return;
        };
        if inner.live[pos].notification.state() != NotificationState::Exiting {
            return;
        }
        let mut entry = inner.live.remove(pos);
        if let Some(state) = entry.notification.advance() {
            self.publish(id, state);
        }
        drop(inner);

        self.document.remove(&id.element_id());
        debug!(%id, "toast removed");
    }

    fn render(&self, notification: &Notification) -> Result<(), crate::dom::DomError> {
        let toast_id = notification.id().element_id();
        let toast = Element::new(toast_id.clone(), "div").with_classes(&notification.class_name());
        let message = Element::new(format!("{toast_id}-message"), "span").with_content(notification.message());
        let close = Element::new(notification.id().close_button_id(), "button").with_classes(CLOSE_BUTTON_CLASSES);

        self.document.append(Some(TOAST_CONTAINER_ID), toast)?;
        let parts = self
            .document
            .append(Some(&toast_id), message)
            .and_then(|()| self.document.append(Some(&toast_id), close));
        if parts.is_err() {
            self.document.remove(&toast_id);
        }
        parts
    }

    fn publish(&self, id: NotificationId, state: NotificationState) {
        // Sending only fails when nobody is subscribed.
        drop(self.events.send(Transition { id, state, at: Instant::now() }));
    }
}
