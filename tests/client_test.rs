//! REST client integration tests against a mock authority

#![cfg(feature = "client")]

use feed_sdk::{
    ActionKind, ClientConfig, EngagementApi, FeedError, FeedProvider, FeedView, NotificationInbox,
    NotificationProvider, RestClient, Session,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> RestClient {
    RestClient::new(ClientConfig::new(format!("{}/api", server.uri())).with_token("tok")).unwrap()
}

#[tokio::test]
async fn test_fetch_feed_sends_bearer_and_parses_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "_id": "p1",
                "description": "hello",
                "userId": {"_id": "u2", "username": "bea"},
                "likes": ["u1"],
                "repost": [{"_id": "r1", "userId": "u1"}],
                "comments": [],
                "date": "2024-05-01T10:00:00Z"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).await.fetch_feed().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "p1");
    assert_eq!(posts[0].author.as_ref().and_then(|a| a.username()), Some("bea"));
    assert_eq!(posts[0].reposts[0].relation_id(), Some("r1"));
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/posts/following"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client(&server).await;
    assert!(matches!(client.fetch_item("missing").await, Err(FeedError::NotFound(_))));

    match client.fetch_following_feed().await {
        Err(FeedError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_repost_lifecycle_through_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "p1", "description": "hi", "likes": [], "repost": [], "comments": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/reposts"))
        .and(body_json(json!({"postId": "p1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "r77", "postId": "p1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/reposts/r77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let view = FeedView::load(Session::new("u1"), &client).await.unwrap();

    let created = view.repost(&client, "p1").await;
    assert!(created.is_committed());
    assert_eq!(created.state.own_relation_id.as_deref(), Some("r77"));

    let removed = view.repost(&client, "p1").await;
    assert!(removed.is_committed());
    let state = view.engagement("p1", ActionKind::Repost);
    assert_eq!((state.active, state.count), (false, 0));
}

#[tokio::test]
async fn test_failed_like_rolls_back_in_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "p1", "description": "hi", "likes": ["u2"], "repost": [], "comments": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/likes"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let view = FeedView::load(Session::new("u1"), &client).await.unwrap();

    let outcome = view.like(&client, "p1").await;
    assert!(!outcome.is_committed());
    let state = view.engagement("p1", ActionKind::Like);
    assert_eq!((state.active, state.count), (false, 1));
}

#[tokio::test]
async fn test_bookmarks_and_follow_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookmarks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "b1", "postId": {"_id": "p1", "description": "saved"}},
            {"_id": "b2", "postId": "p2"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/follow/u9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let bookmarks = client.bookmarks().await.unwrap();
    let ids: Vec<_> = bookmarks.iter().filter_map(|b| b.post.id()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);

    client.toggle_follow("u9").await.unwrap();
}

#[tokio::test]
async fn test_mark_all_against_authority() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "d1", "notificationId": "n1", "type": "like", "read": false, "postId": "p1"},
            {"_id": "d2", "notificationId": "n2", "type": "comment", "read": false, "postId": "p1"},
            {"_id": "d3", "notificationId": "n3", "type": "follow", "read": true}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/notifications/n1/read"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/notifications/n2/read"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let inbox = NotificationInbox::new();
    assert_eq!(inbox.refresh(&client).await.unwrap(), 2);

    let report = inbox.mark_all(&client).await;
    assert_eq!(report.marked, vec!["n1".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.unread, 1);

    assert_eq!(client.fetch_notifications().await.unwrap().len(), 3);
}
