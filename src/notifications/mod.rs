//! Notification read-state management

mod inbox;

pub use inbox::{MarkAllReport, MarkOutcome, NotificationInbox};
