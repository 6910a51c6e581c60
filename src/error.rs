//! Error taxonomy for the VEN agent core.

use std::fmt;

/// Notification delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyChannel {
    Email,
    Text,
}

impl fmt::Display for NotifyChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyChannel::Email => write!(f, "email"),
            NotifyChannel::Text => write!(f, "text"),
        }
    }
}

/// Errors raised by the VEN core.
///
/// Nothing here is allowed to terminate the process: malformed events are
/// rejected as opt-outs, notification failures are swallowed at the dispatch
/// boundary, and transport failures skip the current report tick.
#[derive(Debug, thiserror::Error)]
pub enum VenError {
    /// Event is missing a signal or interval, or has a negative duration.
    #[error("malformed event \"{id}\": {reason}")]
    InvalidEvent { id: String, reason: &'static str },

    /// A best-effort notification channel failed.
    #[error("{channel} notification failed: {reason}")]
    Notification {
        channel: NotifyChannel,
        reason: String,
    },

    /// Report submission to the VTN failed.
    #[error("transport error: {0}")]
    Transport(String),
}
