use async_trait::async_trait;

use crate::error::StorageError;

/// Pluggable storage backend holding attachment files keyed by checksum.
///
/// Implementors provide the actual storage mechanism (filesystem, object
/// store). The worker only requires the removal capability; uploading and
/// serving attachment content belong to the archive services that produce
/// the files.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Remove the stored object identified by `checksum`.
    ///
    /// Returns `Ok(true)` if an object was removed and `Ok(false)` if
    /// nothing was stored under the checksum. Both are success: removal is
    /// idempotent by checksum, so a redelivered delete event or two
    /// concurrent deletes of the same key must all report success.
    async fn remove(&self, checksum: &str) -> Result<bool, StorageError>;
}
