//! Toast notifications and flash message expiry.
//!
//! DESIGN
//! ======
//! `notification` holds the plain data and the lifecycle state machine,
//! `manager` owns the live set and drives the timers, `flash` applies the
//! same timing to server-rendered messages.

pub mod flash;
pub mod manager;
pub mod notification;

pub use flash::{FLASH_CLASS, schedule_flash_expiry};
pub use manager::{NotificationManager, TOAST_CONTAINER_ID, ToastTiming, Transition};
pub use notification::{Notification, NotificationId, NotificationState, Severity, SeverityError};
