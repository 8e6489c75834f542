use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::StorageError;
use crate::store::AttachmentStore;

/// Filesystem-backed attachment store.
///
/// Objects live in a content-addressed layout under a base directory,
/// sharded by the first two characters of the checksum to keep directory
/// fan-out bounded: `{root}/ab/abc123...`.
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    /// Create a new filesystem store rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, checksum: &str) -> PathBuf {
        let shard = checksum.get(..2).unwrap_or(checksum);
        self.root.join(shard).join(checksum)
    }

    /// Validate that the store can write, read, and delete files.
    ///
    /// Performs a full round-trip under the root at startup to catch
    /// permission errors, missing mounts, and overlayfs quirks before the
    /// first delivery arrives.
    pub async fn validate(&self) -> Result<(), StorageError> {
        let test_dir = self.root.join(".health-check");
        let test_file = test_dir.join("test.bin");
        let data = b"storage-health-check";

        fs::create_dir_all(&test_dir).await.map_err(map_io)?;
        fs::write(&test_file, data).await.map_err(map_io)?;

        let read_back = fs::read(&test_file).await.map_err(map_io)?;
        if read_back != data {
            return Err(StorageError::Backend(format!(
                "health-check read-back mismatch at {}",
                test_file.display()
            )));
        }

        fs::remove_file(&test_file).await.map_err(map_io)?;
        // Best-effort cleanup of the marker directory.
        let _ = fs::remove_dir(&test_dir).await;

        debug!(root = %self.root.display(), "storage round-trip validated");
        Ok(())
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn remove(&self, checksum: &str) -> Result<bool, StorageError> {
        let path = self.object_path(checksum);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(checksum, path = %path.display(), "removed attachment object");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(map_io(e)),
        }
    }
}

fn map_io(e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
        _ => StorageError::Io(e.to_string()),
    }
}
