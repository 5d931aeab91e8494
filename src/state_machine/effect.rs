//! Effects produced by state transitions

use crate::conversation::Sender;
use crate::notifications::NotificationKind;

/// Toast shown when a request fails
pub const ERROR_NOTIFICATION: &str = "Error sending message. Please try again.";

/// Bot turn appended in place of a reply when a request fails
pub const FALLBACK_REPLY: &str =
    "I apologize, but I encountered an error. Please try again later.";

/// Effects to be executed, in order, after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the conversation
    AppendMessage { sender: Sender, text: String },

    /// Empty the input field
    ClearInput,

    SetPending(bool),

    SetError(bool),

    /// Issue the single backend call for this cycle
    SendRequest { utterance: String },

    /// Enqueue a toast
    Notify {
        text: String,
        kind: NotificationKind,
    },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn notify_error(text: impl Into<String>) -> Self {
        Effect::Notify {
            text: text.into(),
            kind: NotificationKind::Error,
        }
    }
}
