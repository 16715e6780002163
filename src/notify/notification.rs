//! Notification data: ids, severities and the lifecycle state machine.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use std::fmt;
use std::str::FromStr;

use tokio::time::Instant;

/// Handle to a notification and its rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    /// Id of the toast element in the document.
    #[must_use]
    pub fn element_id(self) -> String {
        format!("toast-{}", self.0)
    }

    /// Id of the toast's close button.
    #[must_use]
    pub fn close_button_id(self) -> String {
        format!("toast-{}-close", self.0)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SEVERITY
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeverityError {
    #[error("unknown notification severity: {0:?}")]
    Unknown(String),
}

impl SeverityError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unknown(_) => "E_UNKNOWN_SEVERITY",
        }
    }
}

/// Severity level. Each maps to exactly one background color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Info, Self::Success, Self::Warning, Self::Error];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Background class for the toast.
    #[must_use]
    pub fn color_class(self) -> &'static str {
        match self {
            Self::Info => "bg-blue-500",
            Self::Success => "bg-green-500",
            Self::Warning => "bg-yellow-500",
            Self::Error => "bg-red-500",
        }
    }
}

impl FromStr for Severity {
    type Err = SeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(SeverityError::Unknown(other.to_owned())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Lifecycle position. Only ever moves forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NotificationState {
    Entering,
    Visible,
    Exiting,
    Removed,
}

impl NotificationState {
    /// The state that follows this one, `None` once removed.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Entering => Some(Self::Visible),
            Self::Visible => Some(Self::Exiting),
            Self::Exiting => Some(Self::Removed),
            Self::Removed => None,
        }
    }

    /// Whether a dismissal would still change anything.
    #[must_use]
    pub fn is_dismissable(self) -> bool {
        matches!(self, Self::Entering | Self::Visible)
    }
}

/// A notification shown in the toast container.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    message: String,
    severity: Severity,
    state: NotificationState,
    created_at: Instant,
}

impl Notification {
    pub(crate) fn new(id: NotificationId, message: String, severity: Severity) -> Self {
        Self { id, message, severity, state: NotificationState::Entering, created_at: Instant::now() }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn state(&self) -> NotificationState {
        self.state
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Step to the next state. Returns the new state, or `None` when already
    /// removed.
    pub(crate) fn advance(&mut self) -> Option<NotificationState> {
        let next = self.state.next()?;
        self.state = next;
        Some(next)
    }

    /// Full class attribute for the toast element.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("{} {TOAST_BASE_CLASSES} {SLIDE_IN} {TOAST_LAYOUT_CLASSES}", self.severity.color_class())
    }
}

pub(crate) const TOAST_BASE_CLASSES: &str = "text-white px-6 py-4 rounded-lg shadow-lg";
pub(crate) const TOAST_LAYOUT_CLASSES: &str = "flex items-center space-x-2";
pub(crate) const SLIDE_IN: &str = "animate-slide-in";
pub(crate) const SLIDE_OUT: &str = "animate-slide-out";
pub(crate) const CLOSE_BUTTON_CLASSES: &str = "toast-close ml-4 text-white hover:text-gray-200";
