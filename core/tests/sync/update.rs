// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Updates of persisted bookings.

use bookingsync_core::{
    EditingSession, Outcome, RecordDelta, SkipReason, SyncConfig, SyncError,
};
use bookingsync_dataverse::{BookingId, BookingPayload, DataverseError};
use serde_json::json;

use crate::common::{Call, RecordingService, changes, synchronizer, update, visit};

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let record = visit("R", "Visit", None);
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(
            &EditingSession::new(),
            &update(
                &record,
                changes(json!({
                    "name": { "oldValue": "Visit", "value": "Checkup" },
                    "duration": { "value": 44.6 },
                })),
            ),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Updated(BookingId::from("R")));
    assert_eq!(
        sync.service().calls(),
        vec![Call::Update(
            BookingId::from("R"),
            BookingPayload {
                name: Some("Checkup".to_string()),
                duration: Some(45),
                ..Default::default()
            }
        )]
    );
}

#[tokio::test]
async fn empty_delta_makes_no_call() {
    let record = visit("R", "Visit", None);
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(&EditingSession::new(), &update(&record, RecordDelta::default()))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::EmptyDelta));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn unmirrored_fields_make_no_call() {
    let record = visit("R", "Visit", None);
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(
            &EditingSession::new(),
            &update(&record, changes(json!({ "iconCls": { "value": "b-fa-car" } }))),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NothingMirrored));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn lead_time_sets_travel_and_arrival() {
    let record = visit("R", "Visit", Some("30"));
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    sync.synchronize(
        &EditingSession::new(),
        &update(&record, changes(json!({ "preamble": { "value": "30" } }))),
    )
    .await
    .unwrap();

    let calls = sync.service().calls();
    let [Call::Update(_, payload)] = calls.as_slice() else {
        panic!("expected one update, got {calls:?}");
    };
    assert_eq!(payload.estimated_travel_duration, Some(30));
    assert_eq!(
        payload.estimated_arrival_time,
        Some("2025-01-01T07:30:00Z".parse().unwrap())
    );
}

#[tokio::test]
async fn lead_time_follows_new_start() {
    let record = visit("R", "Visit", Some("15 minutes"));
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    sync.synchronize(
        &EditingSession::new(),
        &update(
            &record,
            changes(json!({
                "startDate": { "value": "2025-01-01T10:00:00Z" },
                "preamble": { "value": "15 minutes" },
            })),
        ),
    )
    .await
    .unwrap();

    let calls = sync.service().calls();
    let [Call::Update(_, payload)] = calls.as_slice() else {
        panic!("expected one update, got {calls:?}");
    };
    assert_eq!(payload.start_time, Some("2025-01-01T10:00:00Z".parse().unwrap()));
    assert_eq!(payload.estimated_travel_duration, Some(15));
    assert_eq!(
        payload.estimated_arrival_time,
        Some("2025-01-01T09:45:00Z".parse().unwrap())
    );
}

#[tokio::test]
async fn unparsable_lead_time_alone_makes_no_call() {
    let record = visit("R", "Visit", Some("abc"));
    let sync = synchronizer(RecordingService::default(), &[&record], SyncConfig::default());

    let outcome = sync
        .synchronize(
            &EditingSession::new(),
            &update(&record, changes(json!({ "preamble": { "value": "abc" } }))),
        )
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NothingMirrored));
    assert!(sync.service().calls().is_empty());
}

#[tokio::test]
async fn remote_error_is_returned() {
    let record = visit("R", "Visit", None);
    let service = RecordingService::default();
    service.fail_next(DataverseError::NotFound(BookingId::from("R")));
    let sync = synchronizer(service, &[&record], SyncConfig::default());

    let err = sync
        .synchronize(
            &EditingSession::new(),
            &update(&record, changes(json!({ "name": { "value": "Checkup" } }))),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SyncError::Remote(DataverseError::NotFound(ref id)) if id.as_str() == "R"
    ));
    assert_eq!(sync.service().calls().len(), 1);
}
