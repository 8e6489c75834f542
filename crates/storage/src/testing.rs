//! Test doubles and a backend conformance suite.
//!
//! The in-memory store and the conformance tests live in the trait crate so
//! every backend (and the consumer pipeline tests) can share them without a
//! real storage deployment.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::StorageError;
use crate::store::AttachmentStore;

/// In-memory attachment store for tests.
///
/// Backed by a mutex-guarded set of checksums. Records how often `remove`
/// is called and supports one-shot failure injection so pipeline tests can
/// exercise the requeue path without a real backend.
#[derive(Default)]
pub struct MemoryAttachmentStore {
    objects: Mutex<HashSet<String>>,
    fail_remove: Mutex<Option<StorageError>>,
    remove_calls: AtomicU64,
}

impl MemoryAttachmentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an object in the store.
    pub fn insert(&self, checksum: impl Into<String>) {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .insert(checksum.into());
    }

    /// Whether an object is currently stored under the checksum.
    pub fn contains(&self, checksum: &str) -> bool {
        self.objects
            .lock()
            .expect("store mutex poisoned")
            .contains(checksum)
    }

    /// Number of times `remove` has been invoked.
    pub fn remove_calls(&self) -> u64 {
        self.remove_calls.load(Ordering::SeqCst)
    }

    /// Make the next `remove` call fail with the given error.
    pub fn fail_next_remove(&self, error: StorageError) {
        *self.fail_remove.lock().expect("store mutex poisoned") = Some(error);
    }
}

#[async_trait]
impl AttachmentStore for MemoryAttachmentStore {
    async fn remove(&self, checksum: &str) -> Result<bool, StorageError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_remove.lock().expect("store mutex poisoned").take() {
            return Err(err);
        }
        Ok(self
            .objects
            .lock()
            .expect("store mutex poisoned")
            .remove(checksum))
    }
}

/// Run the store conformance suite against a backend.
///
/// Call this from the backend's test module with a fresh store instance in
/// which an object has already been stored under `seeded`.
///
/// # Errors
///
/// Returns an error if the backend fails an operation the suite expects to
/// succeed.
pub async fn run_store_conformance_tests(
    store: &dyn AttachmentStore,
    seeded: &str,
) -> Result<(), StorageError> {
    test_remove_is_idempotent(store, seeded).await?;
    test_remove_absent_is_success(store).await?;
    Ok(())
}

async fn test_remove_is_idempotent(
    store: &dyn AttachmentStore,
    checksum: &str,
) -> Result<(), StorageError> {
    let existed = store.remove(checksum).await?;
    assert!(existed, "first remove of a stored object should report true");

    let existed = store.remove(checksum).await?;
    assert!(
        !existed,
        "second remove of the same checksum should report false, not fail"
    );
    Ok(())
}

async fn test_remove_absent_is_success(store: &dyn AttachmentStore) -> Result<(), StorageError> {
    let existed = store.remove("conformance-never-stored").await?;
    assert!(!existed, "remove of a never-stored checksum should report false");
    Ok(())
}
