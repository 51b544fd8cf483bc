//! Posts and feed snapshots

use crate::refs::{EngagementRef, IdRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A post as delivered by the feed authority.
///
/// Engagement is delivered as relation arrays; their lengths are the
/// engagement counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Author, bare id or populated user
    #[serde(rename = "userId", alias = "author", default)]
    pub author: Option<IdRef>,
    /// Attached image path
    #[serde(rename = "foto", alias = "image", default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub likes: Vec<EngagementRef>,
    #[serde(rename = "repost", alias = "reposts", default, deserialize_with = "null_as_empty")]
    pub reposts: Vec<EngagementRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<serde_json::Value>,
}

/// A relation array sent as `null` counts as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: Some(description.into()),
            author: None,
            image: None,
            date: None,
            likes: Vec::new(),
            reposts: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// A bookmark record; the post pointer may be bare or populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(rename = "postId", alias = "post")]
    pub post: IdRef,
}

/// Ids of the bookmarked posts, skipping records whose post has no id
pub fn bookmarked_post_ids(bookmarks: &[Bookmark]) -> Vec<&str> {
    bookmarks.iter().filter_map(|b| b.post.id()).collect()
}

/// One row of a feed snapshot, reduced to what derived views read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedItem {
    pub id: String,
    pub description: String,
    pub author: Option<IdRef>,
    pub image: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub comment_count: u64,
    pub like_count: u64,
    pub repost_count: u64,
}

impl FeedItem {
    /// Item with counters only, mostly useful for tests and previews
    pub fn with_counts(
        id: impl Into<String>,
        description: impl Into<String>,
        comment_count: u64,
        like_count: u64,
        repost_count: u64,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            comment_count,
            like_count,
            repost_count,
            ..Default::default()
        }
    }
}

impl From<&Post> for FeedItem {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            description: post.description().to_string(),
            author: post.author.clone(),
            image: post.image.clone(),
            date: post.date,
            comment_count: post.comments.len() as u64,
            like_count: post.likes.len() as u64,
            repost_count: post.reposts.len() as u64,
        }
    }
}

/// Ordered, read-only feed contents as fetched by one view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedSnapshot {
    items: Vec<FeedItem>,
}

impl FeedSnapshot {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self { items }
    }

    pub fn from_posts(posts: &[Post]) -> Self {
        Self::new(posts.iter().map(FeedItem::from).collect())
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<FeedItem> for FeedSnapshot {
    fn from_iter<I: IntoIterator<Item = FeedItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
