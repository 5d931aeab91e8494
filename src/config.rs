//! Runtime configuration from the environment

use crate::notifications::ToastTimings;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/chat";

/// Configuration for a chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Full URL requests are posted to
    pub endpoint: String,
    /// Transport timeout; unset means the transport default
    pub timeout: Option<Duration>,
    pub toast: ToastTimings,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            toast: ToastTimings::default(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };
        let defaults = ToastTimings::default();

        Self {
            endpoint: lookup("CHAT_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: lookup("CHAT_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
            toast: ToastTimings {
                entry_delay: millis("CHAT_TOAST_ENTRY_DELAY_MS").unwrap_or(defaults.entry_delay),
                display: millis("CHAT_TOAST_DISPLAY_MS").unwrap_or(defaults.display),
                transition: millis("CHAT_TOAST_TRANSITION_MS").unwrap_or(defaults.transition),
            },
        }
    }
}
