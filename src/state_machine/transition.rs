//! Pure state transition function

use super::effect::{ERROR_NOTIFICATION, FALLBACK_REPLY};
use super::{CycleState, Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: CycleState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: CycleState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    /// A no-op leaves the state alone and asks for nothing
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("A request is already in flight, wait for the reply before sending again")]
    RequestPending,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function: no I/O, same inputs give the same outputs.
///
/// Effect order is part of the contract. On submit the user turn is appended
/// before the request is issued; on settlement `SetPending(false)` is last.
pub fn transition(state: &CycleState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Blank drafts never reach the backend, whatever the state
        (_, Event::Submit { text }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(state.clone()))
        }

        (CycleState::Idle, Event::Submit { text }) => {
            let utterance = text.trim().to_string();
            Ok(TransitionResult::new(CycleState::AwaitingReply {
                utterance: utterance.clone(),
            })
            .with_effects([
                Effect::append_user(utterance.clone()),
                Effect::ClearInput,
                Effect::SetPending(true),
                Effect::SetError(false),
            ])
            .with_effect(Effect::SendRequest { utterance }))
        }

        (CycleState::AwaitingReply { .. }, Event::Submit { .. }) => {
            Err(TransitionError::RequestPending)
        }

        (CycleState::AwaitingReply { .. }, Event::ReplyReceived { text }) => {
            Ok(TransitionResult::new(CycleState::Idle)
                .with_effect(Effect::append_bot(text))
                .with_effect(Effect::SetPending(false)))
        }

        (CycleState::AwaitingReply { .. }, Event::RequestFailed { .. }) => {
            Ok(TransitionResult::new(CycleState::Idle).with_effects([
                Effect::SetError(true),
                Effect::notify_error(ERROR_NOTIFICATION),
                Effect::append_bot(FALLBACK_REPLY),
                Effect::SetPending(false),
            ]))
        }

        (CycleState::Idle, event @ (Event::ReplyReceived { .. } | Event::RequestFailed { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{event:?} with no request in flight"
            )))
        }
    }
}
