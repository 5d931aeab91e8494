//! Toast types and the per-toast display lifecycle

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub text: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(text: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            kind,
        }
    }
}

/// Display phase of one toast
///
/// `Created -> Entering -> Visible -> Exiting -> Removed`. `Removed` is
/// terminal and never observed on a queued entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    Created,
    Entering,
    Visible,
    Exiting,
    Removed,
}

impl ToastPhase {
    pub fn next(self) -> Option<ToastPhase> {
        match self {
            ToastPhase::Created => Some(ToastPhase::Entering),
            ToastPhase::Entering => Some(ToastPhase::Visible),
            ToastPhase::Visible => Some(ToastPhase::Exiting),
            ToastPhase::Exiting => Some(ToastPhase::Removed),
            ToastPhase::Removed => None,
        }
    }

    /// Whether a presentation layer should show the toast
    pub fn is_shown(self) -> bool {
        matches!(self, ToastPhase::Entering | ToastPhase::Visible)
    }
}

/// Toast animation and display durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    /// Delay before the entry animation starts
    pub entry_delay: Duration,
    /// Time from creation until the exit animation starts
    pub display: Duration,
    /// Length of the entry and exit animations
    pub transition: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            entry_delay: Duration::from_millis(10),
            display: Duration::from_millis(3000),
            transition: Duration::from_millis(300),
        }
    }
}

impl ToastTimings {
    /// When `phase` begins, measured from creation. Monotonic in phase order
    /// even if `display` is shorter than the entry animation.
    pub fn offset_of(&self, phase: ToastPhase) -> Duration {
        let entered = self.entry_delay + self.transition;
        let exiting = self.display.max(entered);
        match phase {
            ToastPhase::Created => Duration::ZERO,
            ToastPhase::Entering => self.entry_delay,
            ToastPhase::Visible => entered,
            ToastPhase::Exiting => exiting,
            ToastPhase::Removed => exiting + self.transition,
        }
    }

    /// Total time a toast spends in the queue
    pub fn lifetime(&self) -> Duration {
        self.offset_of(ToastPhase::Removed)
    }
}
