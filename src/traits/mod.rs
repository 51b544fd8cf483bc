//! Collaborator traits and the explicit session value
//!
//! These define the interface between the SDK core and the remote feed
//! authority.

mod provider;
mod session;

pub use provider::{EngagementApi, FeedProvider, NotificationProvider};
pub use session::Session;
