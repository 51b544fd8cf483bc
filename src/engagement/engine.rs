//! Optimistic toggle engine
//!
//! One state machine serves every action kind. A toggle:
//!
//! 1. refuses to start unless the (entity, kind) pair is idle. A second
//!    toggle while one is in flight is dropped, not queued;
//! 2. flips `active` and moves `count` by one in the same step, then enters
//!    `Pending`;
//! 3. runs the caller's remote request;
//! 4. keeps the optimistic values on success, restores the checkpoint on
//!    failure.
//!
//! Removing a repost needs the id of the user's own repost document. When
//! none is known the request is never sent and the toggle reports
//! [`ToggleStatus::Inconsistent`].
//!
//! The engine does not log. Reporting failures is up to the caller.

use super::state::{ActionKind, EngagementState, Phase};
use crate::error::{FeedError, Result};
use crate::refs::EngagementRef;
use crate::traits::EngagementApi;
use dashmap::DashMap;
use std::future::Future;

/// Which way a toggle moves the engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Activate,
    Deactivate,
}

/// What the caller's request function is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub entity_id: String,
    pub kind: ActionKind,
    pub direction: Direction,
    /// Relation to delete, set for deactivations of relation-addressed kinds
    pub relation_id: Option<String>,
}

/// What a successful remote mutation reported back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Id of a newly created relation document
    pub relation_id: Option<String>,
}

impl Receipt {
    pub fn relation(relation_id: Option<String>) -> Self {
        Self { relation_id }
    }
}

/// How a toggle ended
#[derive(Debug)]
pub enum ToggleStatus {
    /// Remote call succeeded, optimistic values kept
    Committed,
    /// Another toggle on the same pair was in flight; nothing happened
    Debounced,
    /// Remote call failed, checkpoint restored
    RolledBack(FeedError),
    /// No own relation to delete; request skipped, checkpoint restored
    Inconsistent,
}

/// Resulting state plus how it was reached
#[derive(Debug)]
pub struct ToggleOutcome {
    pub state: EngagementState,
    pub status: ToggleStatus,
}

impl ToggleOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self.status, ToggleStatus::Committed)
    }

    pub fn is_debounced(&self) -> bool {
        matches!(self.status, ToggleStatus::Debounced)
    }

    /// The failure as an error value, if the toggle failed
    pub fn into_error(self, entity_id: &str) -> Option<FeedError> {
        match self.status {
            ToggleStatus::RolledBack(err) => Some(err),
            ToggleStatus::Inconsistent => Some(FeedError::InconsistentRelation {
                entity_id: entity_id.to_string(),
            }),
            ToggleStatus::Committed | ToggleStatus::Debounced => None,
        }
    }
}

type EngagementKey = (String, ActionKind);

/// Engagement states owned by a single view.
///
/// States are keyed by (entity id, action kind). Map guards are never held
/// across the remote await.
#[derive(Debug, Default)]
pub struct ToggleEngine {
    states: DashMap<EngagementKey, EngagementState>,
}

impl ToggleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed state from an entity's relation collection.
    ///
    /// A pair with a toggle in flight keeps its in-flight state; the
    /// returned value is whatever the engine now holds.
    pub fn seed(
        &self,
        entity_id: &str,
        kind: ActionKind,
        relations: &[EngagementRef],
        user_id: &str,
    ) -> EngagementState {
        let mut state = EngagementState::from_refs(relations, user_id);
        if !kind.removes_by_relation() {
            state.own_relation_id = None;
        }
        self.seed_state(entity_id, kind, state)
    }

    /// Seed a precomputed state, with the same in-flight rule as [`seed`](Self::seed)
    pub fn seed_state(&self, entity_id: &str, kind: ActionKind, state: EngagementState) -> EngagementState {
        let mut entry = self.states.entry((entity_id.to_string(), kind)).or_default();
        if entry.is_idle() {
            *entry = EngagementState {
                phase: Phase::Idle,
                ..state
            };
        }
        entry.value().clone()
    }

    /// Current state; untracked pairs read as inactive with a zero count
    pub fn state(&self, entity_id: &str, kind: ActionKind) -> EngagementState {
        self.states
            .get(&(entity_id.to_string(), kind))
            .map(|s| s.value().clone())
            .unwrap_or_default()
    }

    pub fn is_tracked(&self, entity_id: &str, kind: ActionKind) -> bool {
        self.states.contains_key(&(entity_id.to_string(), kind))
    }

    /// Drop the states held for an entity. Pairs with a toggle in flight
    /// are kept until a later `forget`, so a settling request never lands on
    /// a newer flight's entry.
    pub fn forget(&self, entity_id: &str) {
        self.states.retain(|(id, _), state| id != entity_id || !state.is_idle());
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Toggle one (entity, kind) pair through `request`.
    ///
    /// Never fails: every path ends in a [`ToggleOutcome`].
    pub async fn toggle<F, Fut>(&self, entity_id: &str, kind: ActionKind, request: F) -> ToggleOutcome
    where
        F: FnOnce(MutationRequest) -> Fut,
        Fut: Future<Output = Result<Receipt>>,
    {
        let key: EngagementKey = (entity_id.to_string(), kind);

        let (checkpoint, optimistic) = {
            let mut entry = self.states.entry(key.clone()).or_default();
            match entry.begin() {
                Some(checkpoint) => (checkpoint, entry.value().clone()),
                None => {
                    return ToggleOutcome {
                        state: entry.value().clone(),
                        status: ToggleStatus::Debounced,
                    }
                }
            }
        };

        let direction = if optimistic.active {
            Direction::Activate
        } else {
            Direction::Deactivate
        };

        let relation_id = match direction {
            Direction::Deactivate if kind.removes_by_relation() => optimistic.own_relation_id.clone(),
            _ => None,
        };

        if direction == Direction::Deactivate && kind.removes_by_relation() && relation_id.is_none() {
            let state = self.settle(&key, optimistic, |state| state.rollback(checkpoint));
            return ToggleOutcome {
                state,
                status: ToggleStatus::Inconsistent,
            };
        }

        let result = request(MutationRequest {
            entity_id: entity_id.to_string(),
            kind,
            direction,
            relation_id,
        })
        .await;

        match result {
            Ok(receipt) => {
                let state = self.settle(&key, optimistic, |state| {
                    Self::commit(state, kind, direction, receipt)
                });
                ToggleOutcome {
                    state,
                    status: ToggleStatus::Committed,
                }
            }
            Err(err) => {
                let state = self.settle(&key, optimistic, |state| state.rollback(checkpoint));
                ToggleOutcome {
                    state,
                    status: ToggleStatus::RolledBack(err),
                }
            }
        }
    }

    /// Toggle through an [`EngagementApi`], mapping each kind onto its call
    pub async fn toggle_with(&self, api: &dyn EngagementApi, entity_id: &str, kind: ActionKind) -> ToggleOutcome {
        self.toggle(entity_id, kind, |req| dispatch(api, req)).await
    }

    /// Apply `settle` to the stored state. In-flight entries survive
    /// `forget`, so the lookup finds this flight's entry; the local copy is
    /// only a fallback.
    fn settle(
        &self,
        key: &EngagementKey,
        mut optimistic: EngagementState,
        settle: impl FnOnce(&mut EngagementState),
    ) -> EngagementState {
        match self.states.get_mut(key) {
            Some(mut entry) => {
                settle(entry.value_mut());
                entry.value().clone()
            }
            None => {
                settle(&mut optimistic);
                optimistic
            }
        }
    }

    fn commit(
        state: &mut EngagementState,
        kind: ActionKind,
        direction: Direction,
        receipt: Receipt,
    ) {
        state.commit();
        if kind.removes_by_relation() {
            match direction {
                Direction::Activate => {
                    if receipt.relation_id.is_some() {
                        state.own_relation_id = receipt.relation_id;
                    }
                }
                Direction::Deactivate => state.own_relation_id = None,
            }
        }
    }
}

async fn dispatch(api: &dyn EngagementApi, req: MutationRequest) -> Result<Receipt> {
    match (req.kind, req.direction) {
        (ActionKind::Like, _) => api.toggle_like(&req.entity_id).await.map(|_| Receipt::default()),
        (ActionKind::Bookmark, _) => api.toggle_bookmark(&req.entity_id).await.map(|_| Receipt::default()),
        (ActionKind::Follow, _) => api.toggle_follow(&req.entity_id).await.map(|_| Receipt::default()),
        (ActionKind::Repost, Direction::Activate) => {
            api.create_repost(&req.entity_id).await.map(Receipt::relation)
        }
        (ActionKind::Repost, Direction::Deactivate) => match req.relation_id {
            Some(relation_id) => api.delete_repost(&relation_id).await.map(|_| Receipt::default()),
            None => Err(FeedError::InconsistentRelation {
                entity_id: req.entity_id,
            }),
        },
    }
}
