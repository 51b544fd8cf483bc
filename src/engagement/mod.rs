//! Optimistic engagement toggles (like, repost, bookmark, follow)
//!
//! Every engagement kind runs through the same [`ToggleEngine`] state
//! machine; only the remote request differs.

mod engine;
mod state;

pub use engine::{Direction, MutationRequest, Receipt, ToggleEngine, ToggleOutcome, ToggleStatus};
pub use state::{ActionKind, Checkpoint, EngagementState, Phase};
