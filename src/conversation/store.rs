//! Conversation store

use super::message::{Message, MessageId, Sender};
use crate::runtime::ViewEvent;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::broadcast;

/// Synthetic first turn present in every conversation
pub const GREETING: &str = "Hello! I am your Smart Campus Assistant. How can I help you today?";

/// Inline caption shown while the last exchange failed
pub const ERROR_CAPTION: &str = "Sorry, something went wrong. Please try again later.";

/// Read-only view of a conversation handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    /// True exactly while a request is in flight
    pub pending: bool,
    pub last_error: bool,
}

impl ConversationState {
    /// Whether a draft could be submitted right now (the send button state)
    pub fn can_submit(&self, draft: &str) -> bool {
        !self.pending && !draft.trim().is_empty()
    }

    pub fn error_caption(&self) -> Option<&'static str> {
        self.last_error.then_some(ERROR_CAPTION)
    }
}

/// Append-only message sequence plus the pending and error flags
///
/// Every mutation is published as a [`ViewEvent`] on the channel supplied at
/// construction. Setters only publish when the value actually changes.
pub struct ConversationStore {
    state: ConversationState,
    next_seq: u64,
    events: broadcast::Sender<ViewEvent>,
}

impl ConversationStore {
    /// Create a store seeded with the greeting turn
    pub fn new(events: broadcast::Sender<ViewEvent>) -> Self {
        let mut store = Self {
            state: ConversationState {
                messages: Vec::new(),
                pending: false,
                last_error: false,
            },
            next_seq: 1,
            events,
        };
        store.append_message(Sender::Bot, GREETING);
        store
    }

    pub fn append_message(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        let message = Message {
            id: MessageId::from_sequence(self.next_seq),
            sender,
            text: text.into(),
            created_at: Utc::now(),
        };
        self.next_seq += 1;
        self.state.messages.push(message.clone());

        tracing::debug!(id = %message.id, sender = sender.as_str(), "Message appended");
        let _ = self.events.send(ViewEvent::MessageAppended {
            message: message.clone(),
        });
        message
    }

    pub fn set_pending(&mut self, pending: bool) {
        if self.state.pending == pending {
            return;
        }
        self.state.pending = pending;
        let _ = self.events.send(ViewEvent::PendingChanged { pending });
    }

    pub fn set_error(&mut self, last_error: bool) {
        if self.state.last_error == last_error {
            return;
        }
        self.state.last_error = last_error;
        let _ = self.events.send(ViewEvent::ErrorChanged { last_error });
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn pending(&self) -> bool {
        self.state.pending
    }

    pub fn last_error(&self) -> bool {
        self.state.last_error
    }

    pub fn snapshot(&self) -> ConversationState {
        self.state.clone()
    }
}
