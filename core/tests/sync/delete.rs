// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use bookingsync_core::{EditingSession, MutationEvent, Outcome, SkipReason, SyncConfig};
use bookingsync_dataverse::BookingId;
use serde_json::json;

use crate::common::{Call, RecordingService, remove, synchronizer, visit};

#[tokio::test]
async fn delete_persisted_booking() {
    let record = visit("R", "Visit", None);
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(&EditingSession::new(), &remove(&record))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Deleted(BookingId::from("R")));
    assert_eq!(
        sync.service().calls(),
        vec![Call::Delete(BookingId::from("R"))]
    );
}

#[tokio::test]
async fn delete_placeholder_makes_no_call() {
    let record = visit("_generated_7", "Visit", None);
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(&EditingSession::new(), &remove(&record))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NeverPersisted));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn delete_without_remote_key_makes_no_call() {
    let mut record = visit("R", "Visit", None);
    record.booking_id = None;
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(&EditingSession::new(), &remove(&record))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoRemoteId));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn delete_unnamed_unassigned_booking() {
    let sync = synchronizer(RecordingService::default(), &[], SyncConfig::default());
    let event: MutationEvent = serde_json::from_value(json!({
        "kind": "remove",
        "collection": "events",
        "record": {
            "id": "R",
            "bookableresourcebookingid": "R",
            "name": null,
            "startDate": "2025-01-01T08:00:00Z",
            "endDate": "2025-01-01T09:00:00Z",
            "duration": 60,
            "resourceId": null,
        },
    }))
    .unwrap();

    let outcome = sync
        .synchronize(&EditingSession::new(), &event)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Deleted(BookingId::from("R")));
    assert_eq!(
        sync.service().calls(),
        vec![Call::Delete(BookingId::from("R"))]
    );
}
