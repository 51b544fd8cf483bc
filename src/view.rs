//! Feed view: one screen's snapshot and engagement state
//!
//! A `FeedView` owns what a single open view shows: the posts it fetched,
//! the derived snapshot and a private [`ToggleEngine`]. Two views of the
//! same post do not share state.

use crate::engagement::{ActionKind, EngagementState, ToggleEngine, ToggleOutcome, ToggleStatus};
use crate::error::Result;
use crate::model::{bookmarked_post_ids, FeedItem, FeedSnapshot, Post};
use crate::traits::{EngagementApi, FeedProvider, Session};
use crate::trends::{self, ExploreMode, TrendView};
use std::collections::HashSet;

#[derive(Debug)]
pub struct FeedView {
    session: Session,
    posts: Vec<Post>,
    snapshot: FeedSnapshot,
    engine: ToggleEngine,
}

impl FeedView {
    /// View over already fetched posts
    pub fn from_posts(session: Session, posts: Vec<Post>) -> Self {
        let mut view = Self {
            session,
            posts: Vec::new(),
            snapshot: FeedSnapshot::default(),
            engine: ToggleEngine::new(),
        };
        view.replace_posts(posts);
        view
    }

    /// Fetch the full feed and build a view over it
    pub async fn load(session: Session, provider: &dyn FeedProvider) -> Result<Self> {
        let posts = provider.fetch_feed().await?;
        tracing::debug!(posts = posts.len(), user_id = %session.user_id, "Feed loaded");
        Ok(Self::from_posts(session, posts))
    }

    /// Re-sync from the authority. Pairs with a toggle in flight keep
    /// their in-flight state.
    pub async fn reload(&mut self, provider: &dyn FeedProvider) -> Result<()> {
        let posts = provider.fetch_feed().await?;
        self.replace_posts(posts);
        Ok(())
    }

    /// Swap in new posts and re-derive like and repost state from their
    /// relations. State of posts that left the feed is dropped.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        let current: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        for gone in self.posts.iter().filter(|p| !current.contains(p.id.as_str())) {
            self.engine.forget(&gone.id);
        }

        let user_id = self.session.user_id.as_str();
        for post in &posts {
            self.engine.seed(&post.id, ActionKind::Like, &post.likes, user_id);
            self.engine.seed(&post.id, ActionKind::Repost, &post.reposts, user_id);
        }
        self.snapshot = FeedSnapshot::from_posts(&posts);
        self.posts = posts;
    }

    /// Seed bookmark state from the user's bookmark list.
    ///
    /// Bookmarks have no public counter; the count is 1 while bookmarked.
    /// Returns how many posts of this view are bookmarked.
    pub async fn sync_bookmarks(&self, api: &dyn EngagementApi) -> Result<usize> {
        let bookmarks = api.bookmarks().await?;
        let bookmarked = bookmarked_post_ids(&bookmarks);

        let mut hits = 0;
        for post in &self.posts {
            let active = bookmarked.contains(&post.id.as_str());
            if active {
                hits += 1;
            }
            self.engine
                .seed_state(&post.id, ActionKind::Bookmark, EngagementState::new(active, active as u64));
        }
        Ok(hits)
    }

    /// Seed follow state for a profile shown in this view
    pub fn seed_follow(&self, user_id: &str, following: bool, follower_count: u64) -> EngagementState {
        self.engine
            .seed_state(user_id, ActionKind::Follow, EngagementState::new(following, follower_count))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    pub fn engagement(&self, entity_id: &str, kind: ActionKind) -> EngagementState {
        self.engine.state(entity_id, kind)
    }

    pub async fn like(&self, api: &dyn EngagementApi, post_id: &str) -> ToggleOutcome {
        self.toggle(api, post_id, ActionKind::Like).await
    }

    pub async fn repost(&self, api: &dyn EngagementApi, post_id: &str) -> ToggleOutcome {
        self.toggle(api, post_id, ActionKind::Repost).await
    }

    pub async fn bookmark(&self, api: &dyn EngagementApi, post_id: &str) -> ToggleOutcome {
        self.toggle(api, post_id, ActionKind::Bookmark).await
    }

    pub async fn follow(&self, api: &dyn EngagementApi, user_id: &str) -> ToggleOutcome {
        self.toggle(api, user_id, ActionKind::Follow).await
    }

    /// Toggle through the engine and report how it went
    pub async fn toggle(&self, api: &dyn EngagementApi, entity_id: &str, kind: ActionKind) -> ToggleOutcome {
        let outcome = self.engine.toggle_with(api, entity_id, kind).await;

        match &outcome.status {
            ToggleStatus::Committed => tracing::debug!(
                entity_id = %entity_id,
                %kind,
                active = outcome.state.active,
                count = outcome.state.count,
                "Engagement committed"
            ),
            ToggleStatus::Debounced => {
                tracing::debug!(entity_id = %entity_id, %kind, "Engagement toggle already in flight, ignored")
            }
            ToggleStatus::RolledBack(err) => tracing::warn!(
                entity_id = %entity_id,
                %kind,
                error = %err,
                "Engagement toggle failed, rolled back"
            ),
            ToggleStatus::Inconsistent => tracing::error!(
                entity_id = %entity_id,
                %kind,
                user_id = %self.session.user_id,
                "No own relation to remove; local engagement disagrees with the server"
            ),
        }
        outcome
    }

    /// Trend panels for this view's snapshot
    pub fn trends(&self, filter_term: &str) -> TrendView {
        trends::rank(&self.snapshot, filter_term)
    }

    pub fn explore(&self, query: &str, mode: ExploreMode) -> Vec<FeedItem> {
        trends::explore(&self.snapshot, query, mode)
    }
}
