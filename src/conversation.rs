//! Conversation data and the append-only message store
//!
//! The store is the single source of truth for what the presentation layer
//! renders. It is owned by the runtime and never shared as process state.

mod message;
mod store;

pub use message::{Message, MessageId, Sender};
pub use store::{ConversationState, ConversationStore, ERROR_CAPTION, GREETING};
