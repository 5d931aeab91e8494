//! Self-expiring toast notifications
//!
//! Independent of the conversation store. Each toast walks its lifecycle on
//! its own timer task; dropping the last queue handle or calling
//! [`NotificationQueue::shutdown`] cancels every outstanding timer.

mod toast;

pub use toast::{Notification, NotificationKind, ToastPhase, ToastTimings};

use crate::runtime::ViewEvent;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

struct Entry {
    notification: Notification,
    phase: ToastPhase,
    cancel: CancellationToken,
}

struct Shared {
    entries: Mutex<Vec<Entry>>,
    timings: ToastTimings,
    events: broadcast::Sender<ViewEvent>,
    shutdown: CancellationToken,
}

impl Shared {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move a toast to `phase`. Returns false if the toast is gone.
    fn advance(&self, id: &str, phase: ToastPhase) -> bool {
        let event = {
            let mut entries = self.entries();
            let Some(index) = entries.iter().position(|e| e.notification.id == id) else {
                return false;
            };
            if phase == ToastPhase::Removed {
                entries.remove(index);
                ViewEvent::NotificationRemoved { id: id.to_string() }
            } else {
                entries[index].phase = phase;
                ViewEvent::NotificationPhase {
                    id: id.to_string(),
                    phase,
                }
            }
        };

        tracing::debug!(id, ?phase, "Toast phase changed");
        let _ = self.events.send(event);
        true
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Insertion-ordered queue of toasts
#[derive(Clone)]
pub struct NotificationQueue {
    shared: Arc<Shared>,
}

impl NotificationQueue {
    pub fn new(timings: ToastTimings, events: broadcast::Sender<ViewEvent>) -> Self {
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(Vec::new()),
                timings,
                events,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Append a toast and start its lifecycle timer. After [`Self::shutdown`]
    /// the toast is returned but never queued.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue(&self, text: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification::new(text, kind);
        if self.shared.shutdown.is_cancelled() {
            tracing::debug!(id = %notification.id, "Toast dropped after shutdown");
            return notification;
        }
        let cancel = self.shared.shutdown.child_token();

        self.shared.entries().push(Entry {
            notification: notification.clone(),
            phase: ToastPhase::Created,
            cancel: cancel.clone(),
        });
        let _ = self.shared.events.send(ViewEvent::NotificationAdded {
            notification: notification.clone(),
        });

        tokio::spawn(drive_lifecycle(
            Arc::downgrade(&self.shared),
            notification.id.clone(),
            Instant::now(),
            cancel,
        ));

        notification
    }

    /// Remove a toast immediately. Unknown ids are ignored; returns whether
    /// anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut entries = self.shared.entries();
            entries
                .iter()
                .position(|e| e.notification.id == id)
                .map(|index| entries.remove(index))
        };

        match removed {
            Some(entry) => {
                entry.cancel.cancel();
                let _ = self
                    .shared
                    .events
                    .send(ViewEvent::NotificationRemoved { id: id.to_string() });
                true
            }
            None => false,
        }
    }

    /// Every queued toast, shown or not
    pub fn all(&self) -> Vec<Notification> {
        self.shared
            .entries()
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    /// Toasts a presentation layer should currently show
    pub fn visible(&self) -> Vec<Notification> {
        self.shared
            .entries()
            .iter()
            .filter(|e| e.phase.is_shown())
            .map(|e| e.notification.clone())
            .collect()
    }

    pub fn phase(&self, id: &str) -> Option<ToastPhase> {
        self.shared
            .entries()
            .iter()
            .find(|e| e.notification.id == id)
            .map(|e| e.phase)
    }

    pub fn len(&self) -> usize {
        self.shared.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel all pending timers and remove every queued toast. Later
    /// enqueues are dropped.
    pub fn shutdown(&self) {
        self.shared.shutdown.cancel();
        let drained: Vec<Entry> = self.shared.entries().drain(..).collect();
        for entry in drained {
            entry.cancel.cancel();
            let _ = self.shared.events.send(ViewEvent::NotificationRemoved {
                id: entry.notification.id,
            });
        }
    }
}

async fn drive_lifecycle(
    shared: Weak<Shared>,
    id: String,
    created: Instant,
    cancel: CancellationToken,
) {
    let timings = match shared.upgrade() {
        Some(shared) => shared.timings,
        None => return,
    };

    let mut phase = ToastPhase::Created;
    while let Some(next) = phase.next() {
        let due = created + timings.offset_of(next);
        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep_until(due) => {}
        }

        let Some(queue) = shared.upgrade() else {
            return;
        };
        if !queue.advance(&id, next) {
            return;
        }
        phase = next;
    }
}
