use bytes::Bytes;
use thiserror::Error;

/// Classified failure while decoding a received message into an event.
///
/// Decoding is total: every byte sequence (or its absence) maps to either a
/// valid [`AttachmentEvent`](crate::event::AttachmentEvent) or one of these
/// variants. Both variants are fatal to the delivery and are rejected
/// without requeueing.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The broker delivered no content, e.g. a connection reset
    /// mid-delivery. An infrastructure condition, kept distinct from a
    /// malformed payload so the two are separately observable.
    #[error("empty message: the broker delivered no content")]
    EmptyMessage,

    /// The body was present but failed structural validation: malformed
    /// JSON, a missing required field, a wrong field type, or an
    /// unrecognized action literal.
    #[error("malformed payload: {detail}")]
    MalformedPayload {
        /// What the deserializer objected to.
        detail: String,
        /// The raw body as received, retained for diagnostics.
        body: Bytes,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_display() {
        let err = DecodeError::EmptyMessage;
        assert_eq!(
            err.to_string(),
            "empty message: the broker delivered no content"
        );
    }

    #[test]
    fn malformed_payload_retains_body() {
        let err = DecodeError::MalformedPayload {
            detail: "expected value at line 1 column 1".into(),
            body: Bytes::from_static(b"not json"),
        };
        assert!(err.to_string().starts_with("malformed payload:"));
        match err {
            DecodeError::MalformedPayload { body, .. } => {
                assert_eq!(&body[..], b"not json");
            }
            DecodeError::EmptyMessage => panic!("expected MalformedPayload"),
        }
    }
}
