//! Trend ranking integration tests

use feed_sdk::trends::TREND_LIMIT;
use feed_sdk::{rank, FeedItem, FeedSnapshot, Post, TrendMetric};

fn ids(items: &[FeedItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

/// Counters come from relation array lengths of fetched posts.
#[test]
fn test_rank_from_parsed_posts() {
    let payload = r#"[
        {"_id": "p1", "description": "Rust async in practice", "likes": ["u1", "u2"], "repost": [], "comments": [{}, {}, {}]},
        {"_id": "p2", "description": "gardening notes", "likes": ["u1", "u2", "u3", "u4"], "repost": ["u9"], "comments": []},
        {"_id": "p3", "description": "Why I moved to RUST", "likes": [{"_id": "l1", "userId": "u5"}], "repost": [{"_id": "r1", "userId": {"_id": "u2"}}, "u3"], "comments": [{}]},
        {"_id": "p4", "description": null, "likes": [], "repost": [], "comments": []}
    ]"#;
    let posts: Vec<Post> = serde_json::from_str(payload).unwrap();
    let feed = FeedSnapshot::from_posts(&posts);

    let view = rank(&feed, "rust");
    assert_eq!(ids(&view.by_comments), vec!["p1", "p3"]);
    assert_eq!(ids(&view.by_likes), vec!["p1", "p3"]);
    assert_eq!(ids(&view.by_reposts), vec!["p3", "p1"]);

    // Posts without a description only match the empty filter
    assert_eq!(rank(&feed, "").get(TrendMetric::Likes).len(), 4);
}

#[test]
fn test_each_panel_is_sorted_and_bounded() {
    let feed: FeedSnapshot = (0..12u64)
        .map(|i| FeedItem::with_counts(format!("p{i}"), "daily update", i % 4, (i * 7) % 5, i / 3))
        .collect();

    let view = rank(&feed, "UPDATE");
    for metric in TrendMetric::ALL {
        let panel = view.get(metric);
        assert_eq!(panel.len(), TREND_LIMIT, "{metric:?}");
        assert!(panel.windows(2).all(|w| metric.count(&w[0]) >= metric.count(&w[1])));
    }
}

#[test]
fn test_ranking_is_a_pure_function() {
    let feed = FeedSnapshot::new(vec![
        FeedItem::with_counts("a", "x", 1, 1, 1),
        FeedItem::with_counts("b", "x", 1, 1, 1),
        FeedItem::with_counts("c", "x", 2, 0, 1),
    ]);
    let first = rank(&feed, "x");
    let second = rank(&feed, "x");
    assert_eq!(first, second);
    assert_eq!(ids(&first.by_comments), vec!["c", "a", "b"]);
    assert_eq!(ids(&first.by_reposts), vec!["a", "b", "c"]);
}

#[test]
fn test_empty_snapshot_ranks_empty() {
    let view = rank(&FeedSnapshot::default(), "anything");
    assert!(view.is_empty());
}
