use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the queue the attachments worker consumes, shared with the
/// archive producers that publish lifecycle events into it.
pub const ATTACHMENT_QUEUE: &str = "attachments";

/// Content-addressed identifier for a stored attachment.
///
/// The checksum is stable across renames and is used as the storage key,
/// so deleting by checksum is naturally idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Create a new checksum from a string value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the inner string as a str slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl std::ops::Deref for Checksum {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
