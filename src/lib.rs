//! Feed SDK - client core for a social feed
//!
//! Client-side state for a social feed backed by a remote authority.
//!
//! # Architecture
//!
//! - **refs**: relation references that arrive either as a bare id or as a
//!   populated object, and the identity matching over them
//! - **engagement**: optimistic like / repost / bookmark / follow toggles
//!   with rollback on failure and a per-entity in-flight guard
//! - **notifications**: read state, marking one or all with partial
//!   failure tolerance
//! - **trends**: pure ranked views over a feed snapshot
//! - **client**: REST implementation of the collaborator traits
//!   (`client` feature)
//!
//! The authority stays the source of truth. Local state is seeded from it,
//! changed optimistically, and corrected on the next fetch.
//!
//! # Example
//!
//! ```rust,ignore
//! use feed_sdk::{ActionKind, ClientConfig, FeedView, RestClient};
//!
//! let client = RestClient::new(ClientConfig::from_env()?)?;
//! let session = client.fetch_session().await?;
//!
//! // One view, one engine
//! let view = FeedView::load(session, &client).await?;
//! view.sync_bookmarks(&client).await?;
//!
//! // Flips immediately, reverts if the request fails
//! let outcome = view.like(&client, "post-1").await;
//! println!("{:?}", view.engagement("post-1", ActionKind::Like));
//!
//! // Top five per metric among posts mentioning "rust"
//! let trends = view.trends("rust");
//! ```

// Relation reference normalization
pub mod refs;

// Posts, feed snapshots, notifications
pub mod model;

// Collaborator traits and session
pub mod traits;

// Optimistic toggles
pub mod engagement;

// Notification read state
pub mod notifications;

// Trend ranking and explore
pub mod trends;

// Per-view composition
pub mod view;

// Client configuration
pub mod config;

// REST client
#[cfg(feature = "client")]
pub mod client;

// Error types
pub mod error;

// Re-export core traits
pub use traits::{EngagementApi, FeedProvider, NotificationProvider, Session};

// Re-export domain types
pub use model::{Bookmark, FeedItem, FeedSnapshot, Notification, NotificationKind, NotificationTarget, Post};
pub use refs::{EngagementRef, IdRef};

// Re-export engine types
pub use engagement::{ActionKind, EngagementState, ToggleEngine, ToggleOutcome, ToggleStatus};
pub use notifications::{MarkAllReport, MarkOutcome, NotificationInbox};
pub use trends::{explore, rank, ExploreMode, TrendMetric, TrendView};
pub use view::FeedView;

// Re-export config and client
pub use config::ClientConfig;
#[cfg(feature = "client")]
pub use client::RestClient;

// Re-export error types
pub use error::{FeedError, Result};
