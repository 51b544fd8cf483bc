//! Engagement state and its transitions

use crate::refs::{self, EngagementRef};
use serde::{Deserialize, Serialize};

/// Kind of engagement a user can toggle on an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Like,
    Repost,
    Bookmark,
    /// Following another user; the entity is the user, the count is their
    /// follower count
    Follow,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Like,
        ActionKind::Repost,
        ActionKind::Bookmark,
        ActionKind::Follow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Repost => "repost",
            Self::Bookmark => "bookmark",
            Self::Follow => "follow",
        }
    }

    /// Whether removing this engagement addresses the relation document
    /// rather than the entity
    pub fn removes_by_relation(&self) -> bool {
        matches!(self, Self::Repost)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a state is in its toggle cycle.
///
/// `Reverting` is only held while a failed toggle restores its checkpoint;
/// it never outlives a single settle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Reverting,
}

/// `{active, count}` captured before an optimistic transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub active: bool,
    pub count: u64,
}

/// Per entity × action kind engagement as shown to the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
    pub active: bool,
    pub count: u64,
    pub phase: Phase,
    /// Id of the current user's own relation document (reposts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub own_relation_id: Option<String>,
}

impl EngagementState {
    pub fn new(active: bool, count: u64) -> Self {
        Self {
            active,
            count,
            ..Default::default()
        }
    }

    /// Derive state from an entity's relation collection
    pub fn from_refs(relations: &[EngagementRef], user_id: &str) -> Self {
        Self {
            active: refs::any_matches(relations, user_id),
            count: relations.len() as u64,
            phase: Phase::Idle,
            own_relation_id: refs::own_relation_id(relations, user_id).map(str::to_string),
        }
    }

    pub fn with_relation_id(mut self, relation_id: impl Into<String>) -> Self {
        self.own_relation_id = Some(relation_id.into());
        self
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            active: self.active,
            count: self.count,
        }
    }

    /// Apply the optimistic flip and enter `Pending`.
    ///
    /// Returns `None` without touching anything unless the state is idle.
    pub(crate) fn begin(&mut self) -> Option<Checkpoint> {
        if !self.is_idle() {
            return None;
        }
        let checkpoint = self.checkpoint();
        self.active = !self.active;
        self.count = if self.active {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };
        self.phase = Phase::Pending;
        Some(checkpoint)
    }

    /// Keep the optimistic values
    pub(crate) fn commit(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Restore `{active, count}` from the checkpoint
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        self.phase = Phase::Reverting;
        self.active = checkpoint.active;
        self.count = checkpoint.count;
        self.phase = Phase::Idle;
    }
}
