//! End-to-end pipeline tests: raw body in, ack decision out, storage
//! observed through the in-memory backend.

use std::sync::Arc;

use mailarc_core::AckDecision;
use mailarc_consumer::{Consumer, Dispatcher};
use mailarc_storage::StorageError;
use mailarc_storage::testing::MemoryAttachmentStore;

fn pipeline() -> (Arc<MemoryAttachmentStore>, Consumer) {
    let store = Arc::new(MemoryAttachmentStore::new());
    let consumer = Consumer::new(Dispatcher::new(Arc::clone(&store) as _));
    (store, consumer)
}

#[tokio::test]
async fn delete_removes_stored_object_and_acks() {
    let (store, consumer) = pipeline();
    store.insert("abc123");

    let decision = consumer
        .process(Some(br#"{"action":"DELETE","data":{"checksum":"abc123"}}"#))
        .await;

    assert_eq!(decision, AckDecision::Ack);
    assert!(!store.contains("abc123"));
    assert_eq!(store.remove_calls(), 1, "removal must be invoked exactly once");
}

#[tokio::test]
async fn delete_of_already_absent_object_still_acks() {
    let (store, consumer) = pipeline();

    let decision = consumer
        .process(Some(br#"{"action":"DELETE","data":{"checksum":"abc123"}}"#))
        .await;

    assert_eq!(decision, AckDecision::Ack, "idempotent no-op, not a failure");
    assert_eq!(store.remove_calls(), 1);
}

#[tokio::test]
async fn redelivered_delete_acks_both_times() {
    let (store, consumer) = pipeline();
    store.insert("abc123");
    let body: &[u8] = br#"{"action":"DELETE","data":{"checksum":"abc123"}}"#;

    assert_eq!(consumer.process(Some(body)).await, AckDecision::Ack);
    assert_eq!(consumer.process(Some(body)).await, AckDecision::Ack);
    assert_eq!(store.remove_calls(), 2);
}

#[tokio::test]
async fn concurrent_duplicate_deletes_both_succeed() {
    let (store, consumer) = pipeline();
    store.insert("abc123");
    let consumer = Arc::new(consumer);

    let mut handles = Vec::new();
    for _ in 0..2 {
        let consumer = Arc::clone(&consumer);
        handles.push(tokio::spawn(async move {
            consumer
                .process(Some(br#"{"action":"DELETE","data":{"checksum":"abc123"}}"#))
                .await
        }));
    }

    for handle in handles {
        let decision = handle.await.expect("task should not panic");
        assert_eq!(decision, AckDecision::Ack);
    }
    assert!(!store.contains("abc123"));
}

#[tokio::test]
async fn insert_makes_no_storage_call_and_acks() {
    let (store, consumer) = pipeline();
    store.insert("xyz");

    let decision = consumer
        .process(Some(br#"{"action":"INSERT","data":{"checksum":"xyz"}}"#))
        .await;

    assert_eq!(decision, AckDecision::Ack);
    assert_eq!(store.remove_calls(), 0);
    assert!(store.contains("xyz"));
}

#[tokio::test]
async fn update_makes_no_storage_call_and_acks() {
    let (store, consumer) = pipeline();

    let decision = consumer
        .process(Some(br#"{"action":"UPDATE","data":{"checksum":"xyz"}}"#))
        .await;

    assert_eq!(decision, AckDecision::Ack);
    assert_eq!(store.remove_calls(), 0);
}

#[tokio::test]
async fn transient_storage_error_leaves_message_for_redelivery() {
    let (store, consumer) = pipeline();
    store.insert("bad1");
    store.fail_next_remove(StorageError::Io("connection reset".into()));
    let body: &[u8] = br#"{"action":"DELETE","data":{"checksum":"bad1"}}"#;

    let decision = consumer.process(Some(body)).await;
    assert_eq!(decision, AckDecision::Requeue);
    assert!(store.contains("bad1"), "failed removal must not lose the object");

    // The redelivered message succeeds once the backend recovers.
    let decision = consumer.process(Some(body)).await;
    assert_eq!(decision, AckDecision::Ack);
    assert!(!store.contains("bad1"));
}

#[tokio::test]
async fn empty_delivery_is_rejected_without_storage_call() {
    let (store, consumer) = pipeline();
    assert_eq!(consumer.process(None).await, AckDecision::Reject);
    assert_eq!(store.remove_calls(), 0);
}

#[tokio::test]
async fn malformed_payloads_are_rejected_without_storage_call() {
    let (store, consumer) = pipeline();

    for body in [
        &b"not json"[..],
        br#"{"action":"DROP","data":{"checksum":"x"}}"#,
        br#"{"action":"DELETE"}"#,
        br#"{"data":{"checksum":"x"}}"#,
        br#"{"action":"DELETE","data":{"checksum":42}}"#,
    ] {
        assert_eq!(
            consumer.process(Some(body)).await,
            AckDecision::Reject,
            "body {:?} should be rejected",
            String::from_utf8_lossy(body)
        );
    }
    assert_eq!(store.remove_calls(), 0);
}
