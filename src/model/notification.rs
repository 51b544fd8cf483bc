//! Notifications

use crate::refs::IdRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Repost,
    Follow,
    /// Any kind this client does not know yet
    #[serde(other)]
    Other,
}

/// Where opening a notification leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationTarget {
    /// A post, for likes, comments and reposts
    Post(String),
    /// An actor's profile, for follows
    Profile(String),
}

/// A notification addressed to the current user.
///
/// Only `read` is ever mutated locally, and only towards `true`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNotification")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub actor: Option<IdRef>,
    pub post_id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(id: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: id.into(),
            kind,
            read: false,
            actor: None,
            post_id: None,
            timestamp: None,
        }
    }

    pub fn with_post(mut self, post_id: impl Into<String>) -> Self {
        self.post_id = Some(post_id.into());
        self
    }

    pub fn with_actor(mut self, actor: IdRef) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }

    /// Navigation target, if the payload carries enough to build one
    pub fn target(&self) -> Option<NotificationTarget> {
        match self.kind {
            NotificationKind::Like | NotificationKind::Comment | NotificationKind::Repost => {
                self.post_id.clone().map(NotificationTarget::Post)
            }
            NotificationKind::Follow => self
                .actor
                .as_ref()
                .and_then(IdRef::username)
                .map(|u| NotificationTarget::Profile(u.to_string())),
            NotificationKind::Other => None,
        }
    }
}

/// Server shape. The authority exposes both a document `_id` and a
/// `notificationId`; the latter is the one the mark-read route expects.
#[derive(Debug, Deserialize)]
struct RawNotification {
    #[serde(rename = "notificationId", default)]
    notification_id: Option<String>,
    #[serde(rename = "_id", default)]
    doc_id: Option<String>,
    #[serde(rename = "type")]
    kind: NotificationKind,
    #[serde(default)]
    read: bool,
    #[serde(rename = "actorId", alias = "actor", default)]
    actor: Option<IdRef>,
    #[serde(rename = "postId", default)]
    post_id: Option<IdRef>,
    #[serde(rename = "date", alias = "timestamp", default)]
    timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<RawNotification> for Notification {
    type Error = String;

    fn try_from(raw: RawNotification) -> Result<Self, Self::Error> {
        let id = raw
            .notification_id
            .or(raw.doc_id)
            .ok_or_else(|| "notification without id".to_string())?;
        Ok(Self {
            id,
            kind: raw.kind,
            read: raw.read,
            actor: raw.actor,
            post_id: raw.post_id.as_ref().and_then(IdRef::id).map(str::to_string),
            timestamp: raw.timestamp,
        })
    }
}
