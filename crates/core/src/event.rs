use serde::{Deserialize, Serialize};

use crate::attachment::Attachment;

/// Lifecycle action carried by an attachment event.
///
/// The wire literals are uppercase and case-sensitive; anything outside the
/// three known kinds fails deserialization, so an unrecognized action is a
/// decode-time error and can never reach the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttachmentAction {
    /// An attachment record was created.
    Insert,
    /// An attachment record was deleted.
    Delete,
    /// An attachment record was updated.
    Update,
}

impl AttachmentAction {
    /// Wire literal for this action, for use in structured log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
        }
    }
}

/// The decoded unit of work: one lifecycle event for one attachment.
///
/// Constructed fresh per received message and discarded after the handler
/// returns; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentEvent {
    /// Which lifecycle transition the producer observed.
    pub action: AttachmentAction,

    /// The attachment the event refers to.
    #[serde(rename = "data")]
    pub attachment: Attachment,
}
