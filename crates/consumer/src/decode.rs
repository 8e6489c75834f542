use bytes::Bytes;

use mailarc_core::{AttachmentEvent, DecodeError};

/// Decode a received message body into an attachment event.
///
/// Total over its input: an absent body is classified as
/// [`DecodeError::EmptyMessage`] before any parsing is attempted, and every
/// structural problem in a present body (malformed JSON, missing field,
/// wrong type, unrecognized action literal) is classified as
/// [`DecodeError::MalformedPayload`] with the raw bytes retained for
/// diagnostics. A pure function of the bytes: identical input always
/// decodes identically.
pub fn decode(body: Option<&[u8]>) -> Result<AttachmentEvent, DecodeError> {
    let Some(bytes) = body else {
        return Err(DecodeError::EmptyMessage);
    };

    serde_json::from_slice(bytes).map_err(|e| DecodeError::MalformedPayload {
        detail: e.to_string(),
        body: Bytes::copy_from_slice(bytes),
    })
}
