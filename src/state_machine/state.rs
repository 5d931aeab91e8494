//! Request cycle state

use serde::{Deserialize, Serialize};

/// Where the request cycle is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CycleState {
    /// Ready for user input
    #[default]
    Idle,

    /// One request in flight; further submissions are rejected
    AwaitingReply { utterance: String },
}

impl CycleState {
    /// Matches the store's `pending` flag after effects are applied
    pub fn is_pending(&self) -> bool {
        matches!(self, CycleState::AwaitingReply { .. })
    }

    /// The utterance whose reply is outstanding
    pub fn in_flight(&self) -> Option<&str> {
        match self {
            CycleState::Idle => None,
            CycleState::AwaitingReply { utterance } => Some(utterance),
        }
    }
}
