// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Placeholder records becoming bookings.

use bookingsync_core::{
    ChangeKind, EditingSession, MutationEvent, Outcome, RecordDelta, RecordId, SkipReason,
    SyncConfig, SyncError,
};
use bookingsync_dataverse::{BookingId, BookingPayload, DataverseError, ResourceId};
use serde_json::json;

use crate::common::{Call, RecordingService, changes, synchronizer, update, visit};

#[tokio::test]
async fn create_sends_full_payload_and_rebinds() {
    // Arrange
    let record = visit("_generated_1", "Visit", Some("15"));
    let sync = synchronizer(
        RecordingService::with_ids(&["abc-123"]),
        &[&record],
        SyncConfig::default(),
    );
    let event = update(&record, changes(json!({ "name": { "value": "Visit" } })));

    // Act
    let outcome = sync
        .synchronize(&EditingSession::new(), &event)
        .await
        .unwrap();

    // Assert - payload
    assert_eq!(
        sync.service().calls(),
        vec![Call::Create(BookingPayload {
            name: Some("Visit".to_string()),
            resource: Some(ResourceId::from("5")),
            start_time: Some("2025-01-01T08:00:00Z".parse().unwrap()),
            end_time: Some("2025-01-01T09:00:00Z".parse().unwrap()),
            duration: Some(60),
            estimated_travel_duration: Some(15),
            estimated_arrival_time: Some("2025-01-01T07:45:00Z".parse().unwrap()),
        })]
    );
    let calls = sync.service().calls();
    let Call::Create(payload) = &calls[0] else {
        unreachable!()
    };
    assert_eq!(
        serde_json::to_value(payload).unwrap(),
        json!({
            "name": "Visit",
            "resource@odata.bind": "/bookableresources(5)",
            "starttime": "2025-01-01T08:00:00.000Z",
            "endtime": "2025-01-01T09:00:00.000Z",
            "duration": 60,
            "msdyn_estimatedtravelduration": 15,
            "msdyn_estimatedarrivaltime": "2025-01-01T07:45:00.000Z",
        })
    );

    // Assert - identity
    assert_eq!(
        outcome,
        Outcome::Created {
            placeholder: RecordId::parse("_generated_1"),
            booking: BookingId::from("abc-123"),
        }
    );
    assert!(sync.store().get(&RecordId::parse("_generated_1")).is_none());
    let stored = sync.store().get(&RecordId::parse("abc-123")).unwrap();
    assert_eq!(stored.id, RecordId::parse("abc-123"));
    assert_eq!(stored.booking_id, Some(BookingId::from("abc-123")));
}

#[tokio::test]
async fn create_waits_for_a_name() {
    let unnamed = visit("_generated_1", "", None);
    let sync = synchronizer(
        RecordingService::with_ids(&["abc-123"]),
        &[&unnamed],
        SyncConfig::default(),
    );
    let session = EditingSession::new();

    // Dragged into the grid, no name typed yet
    let event = update(&unnamed, changes(json!({ "duration": { "value": 60 } })));
    let outcome = sync.synchronize(&session, &event).await.unwrap();
    assert_eq!(outcome, Outcome::Skipped(SkipReason::Unnamed));
    assert!(sync.service().calls().is_empty());

    // Same event once the name is set
    let named = visit("_generated_1", "Visit", None);
    let event = update(&named, changes(json!({ "duration": { "value": 60 } })));
    let outcome = sync.synchronize(&session, &event).await.unwrap();
    assert!(matches!(outcome, Outcome::Created { .. }));
    assert_eq!(sync.service().calls().len(), 1);
}

#[tokio::test]
async fn created_record_follows_update_path() {
    let record = visit("_generated_1", "Visit", None);
    let sync = synchronizer(
        RecordingService::with_ids(&["abc-123"]),
        &[&record],
        SyncConfig::default(),
    );
    let session = EditingSession::new();

    sync.synchronize(&session, &update(&record, changes(json!({ "name": { "value": "Visit" } }))))
        .await
        .unwrap();

    // Grid now hands out the rebound record
    let rebound = sync.store().get(&RecordId::parse("abc-123")).unwrap();
    let outcome = sync
        .synchronize(
            &session,
            &update(&rebound, changes(json!({ "name": { "value": "Visit 2" } }))),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Updated(BookingId::from("abc-123")));
    let calls = sync.service().calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], Call::Create(_)));
    assert!(matches!(&calls[1], Call::Update(id, _) if id.as_str() == "abc-123"));
}

#[tokio::test]
async fn stale_placeholder_event_after_create_updates() {
    let record = visit("_generated_1", "Visit", None);
    let sync = synchronizer(
        RecordingService::with_ids(&["abc-123"]),
        &[&record],
        SyncConfig::default(),
    );
    let session = EditingSession::new();

    sync.synchronize(&session, &update(&record, changes(json!({ "name": { "value": "Visit" } }))))
        .await
        .unwrap();

    // A snapshot taken before the rebind still carries the placeholder
    let outcome = sync
        .synchronize(
            &session,
            &update(&record, changes(json!({ "duration": { "value": 90 } }))),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Updated(BookingId::from("abc-123")));
    assert_eq!(
        sync.service().calls()[1],
        Call::Update(
            BookingId::from("abc-123"),
            BookingPayload {
                duration: Some(90),
                ..Default::default()
            }
        )
    );
}

#[tokio::test]
async fn failed_create_leaves_placeholder_for_retry() {
    let record = visit("_generated_1", "Visit", None);
    let service = RecordingService::with_ids(&["abc-123"]);
    service.fail_next(DataverseError::Http("connection reset".to_string()));
    let sync = synchronizer(service, &[&record], SyncConfig::default());
    let session = EditingSession::new();
    let event = update(&record, changes(json!({ "name": { "value": "Visit" } })));

    let err = sync.synchronize(&session, &event).await.unwrap_err();
    assert!(matches!(err, SyncError::Remote(DataverseError::Http(_))));
    assert!(sync.store().get(&RecordId::parse("_generated_1")).is_some());

    // The next update retries the full create
    let outcome = sync.synchronize(&session, &event).await.unwrap();
    assert!(matches!(outcome, Outcome::Created { .. }));
    let calls = sync.service().calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| matches!(c, Call::Create(_))));
}

#[tokio::test]
async fn add_never_creates() {
    let record = visit("_generated_1", "Visit", None);
    let sync = synchronizer(
        RecordingService::default(),
        &[&record],
        SyncConfig::default(),
    );

    let event = MutationEvent::booking(ChangeKind::Add, record, RecordDelta::default());
    let outcome = sync
        .synchronize(&EditingSession::new(), &event)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::AwaitingCreate));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn create_skips_unparsable_travel_time() {
    let record = visit("_generated_1", "Visit", Some("abc"));
    let sync = synchronizer(
        RecordingService::with_ids(&["abc-123"]),
        &[&record],
        SyncConfig::default(),
    );

    sync.synchronize(
        &EditingSession::new(),
        &update(&record, changes(json!({ "name": { "value": "Visit" } }))),
    )
    .await
    .unwrap();

    let calls = sync.service().calls();
    let Call::Create(payload) = &calls[0] else {
        panic!("expected a create");
    };
    let body = serde_json::to_value(payload).unwrap();
    assert!(body.get("msdyn_estimatedtravelduration").is_none());
    assert!(body.get("msdyn_estimatedarrivaltime").is_none());
}
