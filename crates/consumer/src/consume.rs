use tracing::{debug, error, info};

use mailarc_core::{ATTACHMENT_QUEUE, AckDecision, DispatchOutcome};

use crate::decode::decode;
use crate::dispatch::Dispatcher;

/// The outer consumption boundary.
///
/// The only place decode failures and dispatch outcomes meet: every
/// possible result of processing a delivery is converted into an
/// [`AckDecision`], so no failure escapes the boundary and the process
/// never terminates because of a single message.
pub struct Consumer {
    dispatcher: Dispatcher,
}

impl Consumer {
    /// Create a consumer around the given dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Process one delivery body and decide how the message is settled.
    ///
    /// Undecodable messages (empty or malformed) are logged at error level
    /// and rejected without requeueing so they stay visible to operators
    /// instead of circulating forever. Decoded events are dispatched and
    /// settled per the outcome.
    pub async fn process(&self, body: Option<&[u8]>) -> AckDecision {
        info!(queue = ATTACHMENT_QUEUE, "received message");

        let event = match decode(body) {
            Ok(event) => event,
            Err(err) => {
                error!(
                    queue = ATTACHMENT_QUEUE,
                    error = %err,
                    "discarding undecodable message"
                );
                return AckDecision::Reject;
            }
        };
        debug!(
            queue = ATTACHMENT_QUEUE,
            action = event.action.as_str(),
            checksum = %event.attachment.checksum,
            "message parsed"
        );

        let outcome = self.dispatcher.dispatch(&event).await;
        if let DispatchOutcome::Failed(ref failure) = outcome {
            error!(
                checksum = %event.attachment.checksum,
                code = %failure.code,
                error = %failure.message,
                "dispatch failed, leaving message for redelivery"
            );
        }
        outcome.ack_decision()
    }
}
