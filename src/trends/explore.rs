//! Explore listing: free-text search plus a mode filter

use super::aggregator::contains_ignore_case;
use crate::model::{FeedItem, FeedSnapshot};
use crate::refs::IdRef;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;

/// Explore tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMode {
    /// Snapshot order
    #[default]
    All,
    /// Most liked first
    Trending,
    /// Newest first; undated items last
    Latest,
    /// Only items with an attached image
    Media,
}

impl FromStr for ExploreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "trending" => Ok(Self::Trending),
            "latest" => Ok(Self::Latest),
            "media" => Ok(Self::Media),
            other => Err(format!("unknown explore mode: {other}")),
        }
    }
}

fn matches_query(item: &FeedItem, query: &str) -> bool {
    let author = item.author.as_ref();
    contains_ignore_case(&item.description, query)
        || author.and_then(IdRef::username).is_some_and(|u| contains_ignore_case(u, query))
        || author.and_then(IdRef::display_name).is_some_and(|n| contains_ignore_case(n, query))
}

/// Items of `feed` matching `query` (description, author username or
/// display name; blank matches all), arranged by `mode`. Sorting is stable.
pub fn explore(feed: &FeedSnapshot, query: &str, mode: ExploreMode) -> Vec<FeedItem> {
    let query = query.trim();
    let mut items: Vec<FeedItem> = feed
        .iter()
        .filter(|item| matches_query(item, query))
        .cloned()
        .collect();

    match mode {
        ExploreMode::All => {}
        ExploreMode::Trending => items.sort_by_key(|item| Reverse(item.like_count)),
        // Some(_) > None, so undated items sink to the end
        ExploreMode::Latest => items.sort_by_key(|item| Reverse(item.date)),
        ExploreMode::Media => items.retain(|item| item.image.as_deref().is_some_and(|s| !s.is_empty())),
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::RefObject;
    use chrono::{TimeZone, Utc};

    fn feed() -> FeedSnapshot {
        let mut a = FeedItem::with_counts("a", "morning coffee", 0, 1, 0);
        a.author = Some(IdRef::Object(RefObject {
            id: Some("u1".into()),
            username: Some("barista".into()),
            display_name: Some("Lucía".into()),
            ..Default::default()
        }));
        a.date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap());

        let mut b = FeedItem::with_counts("b", "evening run", 0, 4, 0);
        b.image = Some("/uploads/run.png".into());
        b.date = Some(Utc.with_ymd_and_hms(2024, 3, 1, 19, 0, 0).unwrap());

        let mut c = FeedItem::with_counts("c", "Coffee again", 0, 4, 0);
        c.author = Some(IdRef::from("u2"));
        c.image = Some(String::new());

        FeedSnapshot::new(vec![a, b, c])
    }

    fn ids(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_query_matches_description_and_author() {
        assert_eq!(ids(&explore(&feed(), "coffee", ExploreMode::All)), vec!["a", "c"]);
        assert_eq!(ids(&explore(&feed(), "BARISTA", ExploreMode::All)), vec!["a"]);
        assert_eq!(ids(&explore(&feed(), "lucía", ExploreMode::All)), vec!["a"]);
        assert_eq!(ids(&explore(&feed(), "   ", ExploreMode::All)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_modes() {
        assert_eq!(ids(&explore(&feed(), "", ExploreMode::Trending)), vec!["b", "c", "a"]);
        assert_eq!(ids(&explore(&feed(), "", ExploreMode::Latest)), vec!["b", "a", "c"]);
        // An empty image path is no attachment
        assert_eq!(ids(&explore(&feed(), "", ExploreMode::Media)), vec!["b"]);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Latest".parse::<ExploreMode>(), Ok(ExploreMode::Latest));
        assert!("people".parse::<ExploreMode>().is_err());
    }
}
