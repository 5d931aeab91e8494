//! Runtime for a chat session
//!
//! One task owns the conversation store and executes state machine effects.
//! Presentation code talks to it through a [`ChatHandle`].

mod executor;


pub use executor::ChatRuntime;

use crate::conversation::{ConversationState, Message};
use crate::notifications::{Notification, NotificationQueue, ToastPhase};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

/// Change notifications for the presentation layer
#[derive(Debug, Clone)]
pub enum ViewEvent {
    MessageAppended {
        message: Message,
    },
    PendingChanged {
        pending: bool,
    },
    ErrorChanged {
        last_error: bool,
    },
    InputCleared,
    /// Submission refused because a request is in flight
    SubmitRejected {
        reason: String,
    },
    NotificationAdded {
        notification: Notification,
    },
    NotificationPhase {
        id: String,
        phase: ToastPhase,
    },
    NotificationRemoved {
        id: String,
    },
}

/// What happened to a submitted draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// User turn appended and request issued
    Accepted,
    /// Draft was blank
    Ignored,
    /// A request is already in flight
    Rejected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Chat runtime is no longer running")]
    Closed,
}

pub(crate) enum Command {
    Submit {
        text: String,
        reply: oneshot::Sender<SubmitOutcome>,
    },
    Shutdown,
}

/// Handle to interact with a running chat session
#[derive(Clone)]
pub struct ChatHandle {
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<ViewEvent>,
    state_rx: watch::Receiver<ConversationState>,
    notifications: NotificationQueue,
}

impl ChatHandle {
    /// Submit a draft. Resolves once the user turn is appended (or the draft
    /// refused), not when the reply arrives.
    pub async fn submit(&self, text: impl Into<String>) -> Result<SubmitOutcome, SessionError> {
        let (reply, outcome) = oneshot::channel();
        self.command_tx
            .send(Command::Submit {
                text: text.into(),
                reply,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        outcome.await.map_err(|_| SessionError::Closed)
    }

    /// Latest conversation snapshot
    pub fn state(&self) -> ConversationState {
        self.state_rx.borrow().clone()
    }

    /// Wait until no request is in flight and return that snapshot
    pub async fn wait_until_idle(&self) -> Result<ConversationState, SessionError> {
        let mut rx = self.state_rx.clone();
        let state = rx
            .wait_for(|state| !state.pending)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(state.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.broadcast_tx.subscribe()
    }

    /// Toasts that should currently be shown
    pub fn visible_notifications(&self) -> Vec<Notification> {
        self.notifications.visible()
    }

    /// Every queued toast, including ones still entering or exiting
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.all()
    }

    /// Dismiss a toast early. Unknown ids are ignored.
    pub fn dismiss_notification(&self, id: &str) {
        self.notifications.remove(id);
    }

    /// Stop the runtime once any in-flight request settles
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }
}
