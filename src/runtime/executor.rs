//! Chat runtime executor

use super::{ChatHandle, Command, SubmitOutcome, ViewEvent};
use crate::client::{ChatBackend, ChatRequest, ClientError};
use crate::conversation::{ConversationState, ConversationStore};
use crate::notifications::{NotificationQueue, ToastTimings};
use crate::state_machine::{transition, CycleState, Effect, Event, TransitionError};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Owns one conversation and runs its request cycle
pub struct ChatRuntime<B>
where
    B: ChatBackend + 'static,
{
    state: CycleState,
    store: ConversationStore,
    notifications: NotificationQueue,
    backend: Arc<B>,
    command_rx: mpsc::Receiver<Command>,
    /// Settlement events from request tasks
    completion_rx: mpsc::Receiver<Event>,
    completion_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<ViewEvent>,
    state_tx: watch::Sender<ConversationState>,
    stopping: bool,
}

impl<B> ChatRuntime<B>
where
    B: ChatBackend + 'static,
{
    pub fn new(backend: B, timings: ToastTimings) -> (Self, ChatHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (completion_tx, completion_rx) = mpsc::channel(4);
        let (broadcast_tx, _) = broadcast::channel(128);

        let store = ConversationStore::new(broadcast_tx.clone());
        let notifications = NotificationQueue::new(timings, broadcast_tx.clone());
        let (state_tx, state_rx) = watch::channel(store.snapshot());

        let handle = ChatHandle {
            command_tx,
            broadcast_tx: broadcast_tx.clone(),
            state_rx,
            notifications: notifications.clone(),
        };

        let runtime = Self {
            state: CycleState::Idle,
            store,
            notifications,
            backend: Arc::new(backend),
            command_rx,
            completion_rx,
            completion_tx,
            broadcast_tx,
            state_tx,
            stopping: false,
        };

        (runtime, handle)
    }

    /// Build a runtime and run it on a background task
    pub fn spawn(backend: B, timings: ToastTimings) -> ChatHandle {
        let (runtime, handle) = Self::new(backend, timings);
        tokio::spawn(runtime.run());
        handle
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.backend.endpoint(), "Starting chat runtime");

        loop {
            tokio::select! {
                command = self.command_rx.recv(), if !self.stopping => match command {
                    Some(Command::Submit { text, reply }) => {
                        let outcome = self.handle_submit(text);
                        let _ = reply.send(outcome);
                    }
                    Some(Command::Shutdown) | None => self.stopping = true,
                },
                Some(event) = self.completion_rx.recv() => {
                    if let Err(e) = self.process_event(event) {
                        tracing::error!(error = %e, "Dropping settlement event");
                    }
                }
            }

            // An in-flight request always runs to completion before teardown
            if self.stopping && !self.state.is_pending() {
                break;
            }
        }

        self.notifications.shutdown();
        tracing::info!("Chat runtime stopped");
    }

    fn handle_submit(&mut self, text: String) -> SubmitOutcome {
        match self.process_event(Event::Submit { text }) {
            Ok(true) => SubmitOutcome::Accepted,
            Ok(false) => SubmitOutcome::Ignored,
            Err(e) => {
                tracing::warn!(error = %e, "Submission rejected");
                let _ = self.broadcast_tx.send(ViewEvent::SubmitRejected {
                    reason: e.to_string(),
                });
                SubmitOutcome::Rejected
            }
        }
    }

    /// Apply one event. Returns whether it produced any effects.
    fn process_event(&mut self, event: Event) -> Result<bool, TransitionError> {
        self.log_settlement(&event);
        let result = transition(&self.state, event)?;
        let changed = !result.is_noop();
        self.state = result.new_state;

        for effect in result.effects {
            self.execute_effect(effect);
        }

        if changed {
            self.state_tx.send_replace(self.store.snapshot());
        }
        Ok(changed)
    }

    fn log_settlement(&self, event: &Event) {
        let Some(utterance) = self.state.in_flight() else {
            return;
        };
        match event {
            Event::ReplyReceived { text } => tracing::debug!(
                utterance_chars = utterance.chars().count(),
                reply_chars = text.chars().count(),
                "Chat request answered"
            ),
            Event::RequestFailed { kind, message } => tracing::warn!(
                kind = kind.as_str(),
                error = %message,
                utterance_chars = utterance.chars().count(),
                "Chat request failed"
            ),
            Event::Submit { .. } => {}
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendMessage { sender, text } => {
                self.store.append_message(sender, text);
            }
            Effect::ClearInput => {
                let _ = self.broadcast_tx.send(ViewEvent::InputCleared);
            }
            Effect::SetPending(pending) => self.store.set_pending(pending),
            Effect::SetError(last_error) => self.store.set_error(last_error),
            Effect::Notify { text, kind } => {
                self.notifications.enqueue(text, kind);
            }
            Effect::SendRequest { utterance } => self.spawn_request(utterance),
        }
    }

    /// Run the backend call on its own task and post the outcome back
    fn spawn_request(&self, utterance: String) {
        let backend = Arc::clone(&self.backend);
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let request = ChatRequest { message: utterance };
            let call = tokio::spawn(async move { backend.send(&request).await });

            // A panicking backend still settles the cycle
            let outcome = call.await.unwrap_or_else(|e| {
                Err(ClientError::transport(format!("Request task failed: {e}")))
            });

            let event = match outcome {
                Ok(reply) => Event::ReplyReceived {
                    text: reply.response,
                },
                Err(e) => Event::RequestFailed {
                    kind: e.kind,
                    message: e.message,
                },
            };
            let _ = completion_tx.send(event).await;
        });
    }
}
