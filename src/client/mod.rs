//! REST client for the feed authority
//!
//! Implements [`FeedProvider`](crate::FeedProvider),
//! [`NotificationProvider`](crate::NotificationProvider) and
//! [`EngagementApi`](crate::EngagementApi) over HTTP.

mod rest_client;

pub use rest_client::RestClient;
