// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::sync::Arc;

use bookingsync_core::{
    BookingRecord, ChangeKind, EventStore, MutationEvent, RecordDelta, RecordId, SyncConfig,
    Synchronizer,
};
use bookingsync_dataverse::ResourceId;
use serde_json::Value;

use super::service::RecordingService;

/// Creates the "Visit" booking on resource 5, 08:00–09:00Z on 2025-01-01,
/// stored in the grid under `id`.
#[must_use]
pub fn visit(id: &str, name: &str, preamble: Option<&str>) -> BookingRecord {
    let id = RecordId::parse(id);
    let booking_id = match &id {
        RecordId::Permanent(key) => Some(key.clone()),
        RecordId::Placeholder(_) => None,
    };
    BookingRecord {
        id,
        booking_id,
        name: name.to_string(),
        start_date: "2025-01-01T08:00:00Z".parse().unwrap(),
        end_date: "2025-01-01T09:00:00Z".parse().unwrap(),
        duration: 60.0,
        resource_id: Some(ResourceId::from("5")),
        preamble: preamble.map(str::to_string),
        etag: None,
    }
}

/// Parses a grid change set, e.g. `json!({"name": {"value": "Visit"}})`.
#[must_use]
pub fn changes(value: Value) -> RecordDelta {
    serde_json::from_value(value).expect("valid change set")
}

/// An update event of the `events` collection.
#[must_use]
pub fn update(record: &BookingRecord, delta: RecordDelta) -> MutationEvent {
    MutationEvent::booking(ChangeKind::Update, record.clone(), delta)
}

/// A remove event of the `events` collection.
#[must_use]
pub fn remove(record: &BookingRecord) -> MutationEvent {
    MutationEvent::booking(ChangeKind::Remove, record.clone(), RecordDelta::default())
}

/// A synchronizer over a recording service and a store seeded with `records`.
#[must_use]
pub fn synchronizer(
    service: RecordingService,
    records: &[&BookingRecord],
    config: SyncConfig,
) -> Synchronizer<Arc<RecordingService>, Arc<EventStore>> {
    let store = Arc::new(EventStore::new());
    for record in records {
        store.upsert((*record).clone());
    }
    Synchronizer::new(Arc::new(service), store, config)
}
