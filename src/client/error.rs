//! Chat backend error types

use thiserror::Error;

/// Backend error with classification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    pub kind: ClientErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Transport, message)
    }

    pub fn status(status: u16) -> Self {
        Self::new(
            ClientErrorKind::Status,
            format!("Backend responded with status {status}"),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::Malformed, message)
    }
}

/// How a request failed. All kinds are handled identically by the request
/// cycle; the classification only feeds logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// Network unreachable, connection reset, transport timeout
    Transport,
    /// Non-2xx response status
    Status,
    /// Body was not a JSON object with a string `response` field
    Malformed,
}

impl ClientErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Malformed => "malformed",
        }
    }
}
