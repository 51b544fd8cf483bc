//! Domain types shared by the engine, the inbox and the trend views

mod notification;
mod post;

pub use notification::{Notification, NotificationKind, NotificationTarget};
pub use post::{bookmarked_post_ids, Bookmark, FeedItem, FeedSnapshot, Post};
