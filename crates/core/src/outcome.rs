use serde::{Deserialize, Serialize};

use crate::event::AttachmentAction;

/// Outcome of dispatching a decoded attachment event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// The event's action was executed against the storage backend.
    Handled,
    /// The action is recognized but intentionally not implemented. The
    /// message is acknowledged without side effects; this is not an error.
    Unsupported {
        /// The action that was skipped.
        action: AttachmentAction,
    },
    /// The handler failed. The message is left unacknowledged so the
    /// broker's redelivery policy governs retries.
    Failed(DispatchError),
}

impl DispatchOutcome {
    /// Map this outcome to the acknowledgment the transport should perform.
    ///
    /// Total over all variants: successful and intentionally-skipped events
    /// are acked, failures are requeued. Decode errors never produce an
    /// outcome; the consumption boundary rejects those directly.
    #[must_use]
    pub fn ack_decision(&self) -> AckDecision {
        match self {
            Self::Handled | Self::Unsupported { .. } => AckDecision::Ack,
            Self::Failed(_) => AckDecision::Requeue,
        }
    }
}

/// Error detail attached to a failed dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchError {
    /// Error code or category.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Whether the underlying failure is transient.
    pub retryable: bool,
}

/// How a received message should be settled with the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckDecision {
    /// Acknowledge the message; processing is complete.
    Ack,
    /// Reject without requeueing. Used for empty and malformed messages
    /// that would never succeed on redelivery.
    Reject,
    /// Leave the message unacknowledged so the broker redelivers it.
    Requeue,
}
