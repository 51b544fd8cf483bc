//! HTTP client for the feed authority's REST API

use crate::config::ClientConfig;
use crate::error::{FeedError, Result};
use crate::model::{Bookmark, Notification, Post};
use crate::traits::{EngagementApi, FeedProvider, NotificationProvider, Session};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

/// REST client implementing every collaborator trait.
///
/// # Example
///
/// ```rust,no_run
/// use feed_sdk::{ClientConfig, FeedProvider, RestClient};
///
/// # async fn example() -> feed_sdk::Result<()> {
/// let client = RestClient::new(
///     ClientConfig::new("https://feed.example.com/api").with_token("jwt"),
/// )?;
/// let posts = client.fetch_feed().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    config: ClientConfig,
    client: Client,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = config.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| FeedError::Config(format!("invalid token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Profile of the authenticated user
    pub async fn fetch_session(&self) -> Result<Session> {
        self.get_json("users/profile").await
    }

    // === Private Implementation ===

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "Feed API request");
        self.client.request(method, url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        tracing::warn!(status = status.as_u16(), %url, "Feed API returned an error");

        if status == StatusCode::NOT_FOUND {
            return Err(FeedError::NotFound(url));
        }
        let body = response.text().await.unwrap_or_default();
        Err(FeedError::Server {
            status: status.as_u16(),
            message: body,
        })
    }
}

/// Relation id from a create response: either the created document itself
/// or an envelope holding it
fn created_relation_id(body: &Value) -> Option<String> {
    body.get("_id")
        .or_else(|| body.get("repost").and_then(|r| r.get("_id")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl FeedProvider for RestClient {
    async fn fetch_feed(&self) -> Result<Vec<Post>> {
        self.get_json("posts").await
    }

    async fn fetch_following_feed(&self) -> Result<Vec<Post>> {
        self.get_json("posts/following").await
    }

    async fn fetch_user_feed(&self, user_id: &str) -> Result<Vec<Post>> {
        self.get_json(&format!("posts/user/{}", urlencoding::encode(user_id))).await
    }

    async fn fetch_item(&self, id: &str) -> Result<Post> {
        self.get_json(&format!("posts/{}", urlencoding::encode(id))).await
    }
}

#[async_trait]
impl NotificationProvider for RestClient {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.get_json("notifications").await
    }

    async fn mark_read(&self, notification_id: &str) -> Result<()> {
        let path = format!("notifications/{}/read", urlencoding::encode(notification_id));
        self.send(self.request(Method::PUT, &path)).await?;
        Ok(())
    }
}

#[async_trait]
impl EngagementApi for RestClient {
    async fn toggle_like(&self, post_id: &str) -> Result<()> {
        let request = self.request(Method::POST, "likes").json(&json!({ "postId": post_id }));
        self.send(request).await?;
        Ok(())
    }

    async fn create_repost(&self, post_id: &str) -> Result<Option<String>> {
        let request = self.request(Method::POST, "reposts").json(&json!({ "postId": post_id }));
        let response = self.send(request).await?;
        let body: Value = response.json().await.unwrap_or(Value::Null);
        Ok(created_relation_id(&body))
    }

    async fn delete_repost(&self, relation_id: &str) -> Result<()> {
        let path = format!("reposts/{}", urlencoding::encode(relation_id));
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn toggle_bookmark(&self, post_id: &str) -> Result<()> {
        let request = self.request(Method::POST, "bookmarks").json(&json!({ "postId": post_id }));
        self.send(request).await?;
        Ok(())
    }

    async fn bookmarks(&self) -> Result<Vec<Bookmark>> {
        self.get_json("bookmarks").await
    }

    async fn toggle_follow(&self, user_id: &str) -> Result<()> {
        let path = format!("follow/{}", urlencoding::encode(user_id));
        self.send(self.request(Method::POST, &path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_relation_id_shapes() {
        assert_eq!(created_relation_id(&json!({"_id": "r1"})), Some("r1".into()));
        assert_eq!(created_relation_id(&json!({"repost": {"_id": "r2"}})), Some("r2".into()));
        assert_eq!(created_relation_id(&json!({"message": "ok"})), None);
        assert_eq!(created_relation_id(&Value::Null), None);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = RestClient::new(ClientConfig::new("localhost:3000"));
        assert!(matches!(result, Err(FeedError::Config(_))));
    }
}
