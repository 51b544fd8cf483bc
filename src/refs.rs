//! Relation reference normalization
//!
//! The feed authority returns relations (likes, reposts, bookmarks, actors)
//! in whichever shape its query happened to produce: sometimes a bare id,
//! sometimes a populated document, sometimes a document whose actor field is
//! itself populated. Nothing guarantees two calls agree on the shape.
//!
//! All membership questions go through [`matches`], so callers never inspect
//! the shape themselves.
//!
//! ```rust
//! use feed_sdk::refs::{matches, EngagementRef};
//!
//! let raw: EngagementRef = serde_json::from_str(r#""u1""#).unwrap();
//! let nested: EngagementRef =
//!     serde_json::from_str(r#"{"_id": "r9", "userId": {"_id": "u1"}}"#).unwrap();
//!
//! assert!(matches(&raw, "u1"));
//! assert!(matches(&nested, "u1"));
//! ```

use serde::{Deserialize, Serialize};

/// A pointer to another document, either bare or populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdRef {
    /// Bare identifier
    Id(String),
    /// Populated document
    Object(RefObject),
}

impl IdRef {
    /// The referenced id, whichever shape carried it
    pub fn id(&self) -> Option<&str> {
        match self {
            IdRef::Id(id) => Some(id),
            IdRef::Object(obj) => obj.id.as_deref(),
        }
    }

    /// Username, only available on populated user documents
    pub fn username(&self) -> Option<&str> {
        match self {
            IdRef::Id(_) => None,
            IdRef::Object(obj) => obj.username.as_deref(),
        }
    }

    /// Display name, only available on populated user documents
    pub fn display_name(&self) -> Option<&str> {
        match self {
            IdRef::Id(_) => None,
            IdRef::Object(obj) => obj.display_name.as_deref(),
        }
    }

    fn is(&self, id: &str) -> bool {
        self.id() == Some(id)
    }
}

impl From<&str> for IdRef {
    fn from(id: &str) -> Self {
        IdRef::Id(id.to_string())
    }
}

/// Populated document fields the SDK cares about. Everything is optional:
/// a populated document with missing fields simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefObject {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "nombre", alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "foto", alias = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A relation between an actor and a content item (a like, a repost...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EngagementRef {
    /// The relation is represented only by the actor's id
    RawId(String),
    /// The relation document itself
    Populated(PopulatedRef),
}

/// A relation document: its own id plus the actor, bare or populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedRef {
    /// Id of the relation document (needed to delete it)
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The actor who owns the relation
    #[serde(rename = "userId", alias = "actor", default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<IdRef>,
}

impl EngagementRef {
    /// Relation with a bare actor id
    pub fn raw(actor_id: impl Into<String>) -> Self {
        EngagementRef::RawId(actor_id.into())
    }

    /// Relation document with its own id and a bare actor id
    pub fn populated(relation_id: impl Into<String>, actor_id: impl Into<String>) -> Self {
        EngagementRef::Populated(PopulatedRef {
            id: Some(relation_id.into()),
            actor: Some(IdRef::Id(actor_id.into())),
        })
    }

    /// Relation document whose actor is itself populated
    pub fn nested(relation_id: impl Into<String>, actor_id: impl Into<String>) -> Self {
        EngagementRef::Populated(PopulatedRef {
            id: Some(relation_id.into()),
            actor: Some(IdRef::Object(RefObject {
                id: Some(actor_id.into()),
                ..Default::default()
            })),
        })
    }

    /// Id of the relation document, when the authority sent one
    pub fn relation_id(&self) -> Option<&str> {
        match self {
            EngagementRef::RawId(_) => None,
            EngagementRef::Populated(doc) => doc.id.as_deref(),
        }
    }
}

/// Whether `reference` belongs to `user_id`.
///
/// A bare id is compared by value. A populated relation matches when its
/// actor is the bare id `user_id`, or a populated actor whose id is
/// `user_id`. Anything else, including an empty `user_id`, is `false`.
pub fn matches(reference: &EngagementRef, user_id: &str) -> bool {
    if user_id.is_empty() {
        return false;
    }
    match reference {
        EngagementRef::RawId(id) => id == user_id,
        EngagementRef::Populated(doc) => doc.actor.as_ref().is_some_and(|actor| actor.is(user_id)),
    }
}

/// Whether any relation in `refs` belongs to `user_id`
pub fn any_matches(refs: &[EngagementRef], user_id: &str) -> bool {
    refs.iter().any(|r| matches(r, user_id))
}

/// Relation id of the first relation owned by `user_id`.
///
/// `None` when the user owns no relation, or when the first one they own
/// was delivered as a bare id and therefore carries no relation id.
pub fn own_relation_id<'a>(refs: &'a [EngagementRef], user_id: &str) -> Option<&'a str> {
    refs.iter()
        .find(|r| matches(r, user_id))
        .and_then(EngagementRef::relation_id)
}

/// Whether `target_id` appears in a list of bare-or-populated pointers
pub fn contains_id(refs: &[IdRef], target_id: &str) -> bool {
    refs.iter().any(|r| r.is(target_id))
}
