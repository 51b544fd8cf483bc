//! Authenticated user, passed explicitly into every membership check

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the auth collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id", alias = "id")]
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Anonymous sessions match no relation
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_empty()
    }
}
