//! Events that drive the request cycle

use crate::client::ClientErrorKind;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User pressed send with the current draft (untrimmed)
    Submit { text: String },

    /// Backend answered with a well-formed reply
    ReplyReceived { text: String },

    /// Transport failure, non-2xx status, or malformed payload
    RequestFailed {
        kind: ClientErrorKind,
        message: String,
    },
}
