//! Remote collaborator seams
//!
//! The SDK never talks to the network directly from its core components.
//! Everything remote goes through these traits so views can run against
//! the REST client in production and in-memory fakes in tests.

use crate::error::Result;
use crate::model::{Bookmark, Notification, Post};
use async_trait::async_trait;

/// Source of feed contents
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Every post visible to the current user
    async fn fetch_feed(&self) -> Result<Vec<Post>>;

    /// Posts from accounts the current user follows
    async fn fetch_following_feed(&self) -> Result<Vec<Post>>;

    /// Posts authored by one user
    async fn fetch_user_feed(&self, user_id: &str) -> Result<Vec<Post>>;

    /// A single post
    async fn fetch_item(&self, id: &str) -> Result<Post>;
}

/// Source of notifications and their read-state mutation
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>>;

    /// Mark one notification read on the authority. Idempotent.
    async fn mark_read(&self, notification_id: &str) -> Result<()>;
}

/// Remote engagement mutations, one per action kind.
///
/// Likes, bookmarks and follows are server-side toggles; reposts are
/// explicit create/delete pairs, and deleting needs the relation id.
#[async_trait]
pub trait EngagementApi: Send + Sync {
    async fn toggle_like(&self, post_id: &str) -> Result<()>;

    /// Create a repost, returning the new relation id when the authority
    /// sends one back
    async fn create_repost(&self, post_id: &str) -> Result<Option<String>>;

    async fn delete_repost(&self, relation_id: &str) -> Result<()>;

    async fn toggle_bookmark(&self, post_id: &str) -> Result<()>;

    /// The current user's bookmarks
    async fn bookmarks(&self) -> Result<Vec<Bookmark>>;

    async fn toggle_follow(&self, user_id: &str) -> Result<()>;
}
