use serde::{Deserialize, Serialize};

use crate::types::Checksum;

/// A file associated with an archived email.
///
/// The record is built from the `data` field of a lifecycle event payload.
/// Only the checksum participates in any decision; the remaining metadata
/// is carried along for diagnostics and is opaque to the pipeline. Fields
/// the payload does not carry deserialize to `None`, and unrecognized
/// payload fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Content-addressed identifier, used as the storage key.
    pub checksum: Checksum,

    /// Original filename, if the payload carried one.
    #[serde(default)]
    pub filename: Option<String>,

    /// Size of the stored file in bytes.
    #[serde(default)]
    pub size_bytes: Option<u64>,

    /// Reference to the archived message that owns this attachment.
    #[serde(default)]
    pub message_id: Option<i64>,
}
