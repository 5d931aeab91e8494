//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::client::ClientErrorKind;
use crate::conversation::Sender;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn arb_draft() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[ ]{0,2}[a-zA-Z0-9?]{1,20}[ ]{0,2}",
        1 => arb_blank(),
    ]
}

fn arb_error_kind() -> impl Strategy<Value = ClientErrorKind> {
    prop_oneof![
        Just(ClientErrorKind::Transport),
        Just(ClientErrorKind::Status),
        Just(ClientErrorKind::Malformed),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_draft().prop_map(|text| Event::Submit { text }),
        "[a-zA-Z .-]{0,30}".prop_map(|text| Event::ReplyReceived { text }),
        (arb_error_kind(), "[a-z ]{0,20}")
            .prop_map(|(kind, message)| Event::RequestFailed { kind, message }),
    ]
}

fn arb_state() -> impl Strategy<Value = CycleState> {
    prop_oneof![
        Just(CycleState::Idle),
        "[a-z]{1,10}".prop_map(|utterance| CycleState::AwaitingReply { utterance }),
    ]
}

/// Replays effects against a model of the conversation
#[derive(Default)]
struct Model {
    turns: Vec<Sender>,
    pending: bool,
    last_error: bool,
    requests: usize,
    notifications: usize,
}

impl Model {
    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::AppendMessage { sender, .. } => self.turns.push(*sender),
                Effect::SetPending(p) => self.pending = *p,
                Effect::SetError(e) => self.last_error = *e,
                Effect::SendRequest { .. } => self.requests += 1,
                Effect::Notify { .. } => self.notifications += 1,
                Effect::ClearInput => {}
            }
        }
    }
}

proptest! {
    /// Blank drafts never change state or produce effects
    #[test]
    fn prop_blank_submit_is_noop(state in arb_state(), text in arb_blank()) {
        let result = transition(&state, Event::Submit { text }).unwrap();
        prop_assert_eq!(result.new_state, state);
        prop_assert!(result.effects.is_empty());
    }

    /// A non-blank submit from idle appends the user turn before the request
    /// and issues exactly one request
    #[test]
    fn prop_submit_orders_user_turn_before_request(text in "[ ]{0,2}[a-z]{1,10}[ ]{0,2}") {
        let result = transition(&CycleState::Idle, Event::Submit { text: text.clone() }).unwrap();

        let append = result.effects.iter().position(|e| matches!(e, Effect::AppendMessage { sender: Sender::User, .. }));
        let request = result.effects.iter().position(|e| matches!(e, Effect::SendRequest { .. }));
        prop_assert!(append.is_some());
        prop_assert!(request.is_some());
        prop_assert!(append < request);
        prop_assert_eq!(result.effects.iter().filter(|e| matches!(e, Effect::SendRequest { .. })).count(), 1);

        let expected = Effect::SendRequest { utterance: text.trim().to_string() };
        prop_assert_eq!(result.effects.last(), Some(&expected));
    }

    /// Settlement always ends with pending cleared
    #[test]
    fn prop_settlement_clears_pending_last(state in "[a-z]{1,10}".prop_map(|utterance| CycleState::AwaitingReply { utterance }), event in arb_event()) {
        if matches!(event, Event::Submit { .. }) {
            return Ok(());
        }
        let result = transition(&state, event).unwrap();
        prop_assert_eq!(result.new_state, CycleState::Idle);
        prop_assert_eq!(result.effects.last(), Some(&Effect::SetPending(false)));
        prop_assert_eq!(result.effects.iter().filter(|e| matches!(e, Effect::AppendMessage { sender: Sender::Bot, .. })).count(), 1);
    }

    /// Driving the machine with arbitrary events (invalid ones dropped, as
    /// the runtime does) keeps the model consistent: pending mirrors the
    /// state, every settled request contributes exactly two turns, and at
    /// most one request is ever outstanding.
    #[test]
    fn prop_event_sequences_keep_invariants(events in proptest::collection::vec(arb_event(), 1..40)) {
        let mut state = CycleState::Idle;
        let mut model = Model::default();
        let mut settled = 0usize;
        let mut failures = 0usize;

        for event in events {
            let failed = matches!(event, Event::RequestFailed { .. });
            let Ok(result) = transition(&state, event) else {
                continue;
            };

            let was_pending = state.is_pending();
            model.apply(&result.effects);
            state = result.new_state;

            if was_pending && !state.is_pending() {
                settled += 1;
                if failed {
                    failures += 1;
                    prop_assert!(model.last_error);
                } else {
                    prop_assert!(!model.last_error);
                }
            }

            prop_assert_eq!(model.pending, state.is_pending());
            prop_assert!(model.requests <= settled + 1);
            prop_assert_eq!(model.requests, settled + usize::from(state.is_pending()));
        }

        prop_assert_eq!(model.turns.len(), settled * 2 + usize::from(state.is_pending()));
        prop_assert_eq!(model.notifications, failures);
    }
}
