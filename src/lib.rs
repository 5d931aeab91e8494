//! Campus Chat - conversation core for a single-page chat widget
//!
//! A user utterance is posted to a backend, the reply is appended to an
//! append-only conversation, and failures raise self-expiring toasts.

pub mod client;
pub mod config;
pub mod conversation;
pub mod notifications;
pub mod runtime;
pub mod state_machine;

pub use client::{ChatBackend, ChatReply, ChatRequest, ClientError, HttpChatBackend, LoggingBackend};
pub use config::ChatConfig;
pub use conversation::{ConversationState, ConversationStore, Message, Sender};
pub use notifications::{Notification, NotificationKind, NotificationQueue, ToastTimings};
pub use runtime::{ChatHandle, ChatRuntime, SessionError, SubmitOutcome, ViewEvent};
