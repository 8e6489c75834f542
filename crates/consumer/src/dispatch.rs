use std::sync::Arc;

use tracing::{debug, info, warn};

use mailarc_core::{
    Attachment, AttachmentAction, AttachmentEvent, DispatchError, DispatchOutcome,
};
use mailarc_storage::{AttachmentStore, StorageError};

/// Routes decoded events to the matching action handler and converts every
/// handler result into a [`DispatchOutcome`].
///
/// The dispatcher holds no per-message state, so a single instance serves
/// any number of concurrent in-flight deliveries without coordination.
pub struct Dispatcher {
    store: Arc<dyn AttachmentStore>,
}

impl Dispatcher {
    /// Create a dispatcher over the given storage backend.
    #[must_use]
    pub fn new(store: Arc<dyn AttachmentStore>) -> Self {
        Self { store }
    }

    /// Route an event by its action kind.
    ///
    /// `INSERT` and `UPDATE` are reserved for future use: they acknowledge
    /// without side effects and are reported as [`DispatchOutcome::Unsupported`],
    /// never as an error. `DELETE` invokes the delete handler. A handler
    /// failure never propagates past this method; it is converted to
    /// [`DispatchOutcome::Failed`] with the cause attached.
    pub async fn dispatch(&self, event: &AttachmentEvent) -> DispatchOutcome {
        match event.action {
            AttachmentAction::Insert | AttachmentAction::Update => {
                debug!(
                    action = event.action.as_str(),
                    checksum = %event.attachment.checksum,
                    "action received but not handled"
                );
                DispatchOutcome::Unsupported {
                    action: event.action,
                }
            }
            AttachmentAction::Delete => self.handle_delete(&event.attachment).await,
        }
    }

    /// Remove the attachment's stored object, keyed by checksum.
    ///
    /// Removal is idempotent: an object already absent from storage is a
    /// successful no-op, so a redelivered delete event cannot enter a
    /// spurious failure loop.
    async fn handle_delete(&self, attachment: &Attachment) -> DispatchOutcome {
        let checksum = &attachment.checksum;
        info!(checksum = %checksum, "starting attachment removal");

        match self.store.remove(checksum).await {
            Ok(existed) => {
                if !existed {
                    debug!(checksum = %checksum, "object already absent, treating as removed");
                }
                info!(checksum = %checksum, "finished attachment removal");
                DispatchOutcome::Handled
            }
            Err(err) => {
                warn!(
                    checksum = %checksum,
                    error = %err,
                    retryable = err.is_retryable(),
                    "attachment removal failed"
                );
                DispatchOutcome::Failed(DispatchError {
                    code: error_code(&err),
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                })
            }
        }
    }
}

/// Map a [`StorageError`] variant to a short error code string.
fn error_code(err: &StorageError) -> String {
    match err {
        StorageError::PermissionDenied(_) => "PERMISSION_DENIED".into(),
        StorageError::Io(_) => "IO".into(),
        StorageError::Unavailable(_) => "UNAVAILABLE".into(),
        StorageError::Timeout(_) => "TIMEOUT".into(),
        StorageError::Backend(_) => "BACKEND".into(),
    }
}
