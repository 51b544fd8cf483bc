//! Ranked top-N panels over a feed snapshot

use crate::model::{FeedItem, FeedSnapshot};

/// Maximum entries per ranked panel
pub const TREND_LIMIT: usize = 5;

/// Counter a panel is ranked by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendMetric {
    Comments,
    Likes,
    Reposts,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 3] = [TrendMetric::Comments, TrendMetric::Likes, TrendMetric::Reposts];

    pub fn count(&self, item: &FeedItem) -> u64 {
        match self {
            Self::Comments => item.comment_count,
            Self::Likes => item.like_count,
            Self::Reposts => item.repost_count,
        }
    }
}

/// The three ranked panels derived from one snapshot and filter term
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrendView {
    pub by_comments: Vec<FeedItem>,
    pub by_likes: Vec<FeedItem>,
    pub by_reposts: Vec<FeedItem>,
}

impl TrendView {
    pub fn get(&self, metric: TrendMetric) -> &[FeedItem] {
        match metric {
            TrendMetric::Comments => &self.by_comments,
            TrendMetric::Likes => &self.by_likes,
            TrendMetric::Reposts => &self.by_reposts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_comments.is_empty() && self.by_likes.is_empty() && self.by_reposts.is_empty()
    }
}

/// Whether `text` contains `term`, ignoring case. An empty term matches
/// everything.
pub(crate) fn contains_ignore_case(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

/// Rank `feed` under `filter_term`.
///
/// Items whose description contains the term (case-insensitively) are
/// ranked per metric, highest first. Equal counts keep their snapshot order.
/// Each panel holds at most [`TREND_LIMIT`] items. Pure and deterministic.
pub fn rank(feed: &FeedSnapshot, filter_term: &str) -> TrendView {
    let filtered: Vec<&FeedItem> = feed
        .iter()
        .filter(|item| contains_ignore_case(&item.description, filter_term))
        .collect();

    TrendView {
        by_comments: top(&filtered, TrendMetric::Comments),
        by_likes: top(&filtered, TrendMetric::Likes),
        by_reposts: top(&filtered, TrendMetric::Reposts),
    }
}

fn top(items: &[&FeedItem], metric: TrendMetric) -> Vec<FeedItem> {
    let mut ranked = items.to_vec();
    // sort_by is stable: ties keep snapshot order
    ranked.sort_by(|a, b| metric.count(b).cmp(&metric.count(a)));
    ranked.into_iter().take(TREND_LIMIT).cloned().collect()
}
