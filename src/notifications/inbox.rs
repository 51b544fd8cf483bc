//! Notification read-state
//!
//! Marking read is optimistic and never undone: a failed mark-read leaves
//! the item read locally until the next full refresh says otherwise. This
//! is the opposite of engagement toggles, which roll back.
//!
//! Bulk marking sends one request per unread item, concurrently, and flips
//! each item only when its own request succeeds. A partial failure leaves
//! exactly the failed items unread.

use crate::error::{FeedError, Result};
use crate::model::{Notification, NotificationTarget};
use crate::traits::NotificationProvider;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of marking one notification
#[derive(Debug)]
pub enum MarkOutcome {
    /// Flipped locally and confirmed remotely
    Marked,
    /// Flipped locally, remote call failed; not rolled back
    RemoteFailed(FeedError),
    /// Was already read; no remote call
    AlreadyRead,
    /// Not in the inbox; no remote call
    Unknown,
}

impl MarkOutcome {
    /// Whether the item is read locally after the call
    pub fn is_read(&self) -> bool {
        !matches!(self, MarkOutcome::Unknown)
    }
}

/// Result of a bulk mark once every request has settled
#[derive(Debug, Default)]
pub struct MarkAllReport {
    /// Ids confirmed read
    pub marked: Vec<String>,
    /// Ids whose request failed; still unread
    pub failed: Vec<(String, FeedError)>,
    /// Unread counter after settling
    pub unread: usize,
}

impl MarkAllReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
struct InboxState {
    notifications: Vec<Notification>,
    unread: usize,
}

impl InboxState {
    fn count_unread(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Flip one item to read. Returns `None` for unknown ids, otherwise
    /// whether it was unread before.
    fn flip_read(&mut self, id: &str) -> Option<bool> {
        let item = self.notifications.iter_mut().find(|n| n.id == id)?;
        if item.read {
            return Some(false);
        }
        item.read = true;
        self.unread = self.unread.saturating_sub(1);
        Some(true)
    }
}

/// Notifications of one view with their unread counter.
///
/// Cloning shares the same inbox, so progress of an in-flight
/// [`mark_all`](Self::mark_all) is visible through any clone.
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    inner: Arc<Mutex<InboxState>>,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        let mut state = InboxState {
            notifications,
            unread: 0,
        };
        state.unread = state.count_unread();
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Replace the contents with a freshly fetched list
    pub async fn replace(&self, notifications: Vec<Notification>) -> usize {
        let mut state = self.inner.lock().await;
        state.notifications = notifications;
        state.unread = state.count_unread();
        state.unread
    }

    /// Full refetch; corrects any drift left by failed mark-read calls.
    ///
    /// On failure the current contents are kept.
    pub async fn refresh(&self, provider: &dyn NotificationProvider) -> Result<usize> {
        let notifications = provider.fetch_notifications().await?;
        Ok(self.replace(notifications).await)
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().await.notifications.clone()
    }

    pub async fn unread_count(&self) -> usize {
        self.inner.lock().await.unread
    }

    /// Recompute the unread counter from the items
    pub async fn recount(&self) -> usize {
        let mut state = self.inner.lock().await;
        state.unread = state.count_unread();
        state.unread
    }

    pub async fn target_of(&self, id: &str) -> Option<NotificationTarget> {
        let state = self.inner.lock().await;
        state.notifications.iter().find(|n| n.id == id).and_then(Notification::target)
    }

    /// Mark one notification read, optimistically and without rollback
    pub async fn mark_one(&self, provider: &dyn NotificationProvider, id: &str) -> MarkOutcome {
        let was_unread = self.inner.lock().await.flip_read(id);
        match was_unread {
            None => MarkOutcome::Unknown,
            Some(false) => MarkOutcome::AlreadyRead,
            Some(true) => match provider.mark_read(id).await {
                Ok(()) => MarkOutcome::Marked,
                Err(err) => {
                    tracing::warn!(notification_id = %id, error = %err, "Mark-read failed, keeping local read state");
                    MarkOutcome::RemoteFailed(err)
                }
            },
        }
    }

    /// Mark every unread notification, one concurrent request each.
    ///
    /// Each item flips as soon as its own request succeeds; failed items stay
    /// unread. Completion order is unspecified.
    pub async fn mark_all(&self, provider: &dyn NotificationProvider) -> MarkAllReport {
        let unread_ids: Vec<String> = {
            let state = self.inner.lock().await;
            state
                .notifications
                .iter()
                .filter(|n| !n.read)
                .map(|n| n.id.clone())
                .collect()
        };

        let calls = unread_ids.into_iter().map(|id| async move {
            let result = provider.mark_read(&id).await;
            if result.is_ok() {
                self.inner.lock().await.flip_read(&id);
            }
            (id, result)
        });

        let mut report = MarkAllReport::default();
        for (id, result) in join_all(calls).await {
            match result {
                Ok(()) => report.marked.push(id),
                Err(err) => {
                    tracing::warn!(notification_id = %id, error = %err, "Mark-read failed, leaving unread");
                    report.failed.push((id, err));
                }
            }
        }
        report.unread = self.unread_count().await;

        tracing::debug!(
            marked = report.marked.len(),
            failed = report.failed.len(),
            unread = report.unread,
            "Bulk mark-read settled"
        );
        report
    }

    /// Open a notification: mark it read if needed, then resolve where it
    /// leads
    pub async fn open(&self, provider: &dyn NotificationProvider, id: &str) -> Option<NotificationTarget> {
        self.mark_one(provider, id).await;
        self.target_of(id).await
    }
}
