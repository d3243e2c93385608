// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use bookingsync_dataverse::CreatedBooking;

use crate::record::{BookingRecord, RecordId};
use crate::store::{Changeset, LocalStore, RecordUpdate, StoreError};

/// Gives a freshly created booking its permanent identifier in the local store.
///
/// The identifier and the remote key change in one changeset, so observers
/// never see the record deleted and re-added. Only call this once per record,
/// right after the create that produced `created` succeeded.
///
/// # Errors
///
/// Returns an error if the store no longer holds the placeholder.
pub fn rebind<S: LocalStore + ?Sized>(
    store: &S,
    record: &BookingRecord,
    created: &CreatedBooking,
) -> Result<RecordId, StoreError> {
    debug_assert!(record.id.is_placeholder(), "rebinding a persisted record");

    let id = RecordId::Permanent(created.id.clone());
    store.apply_changeset(Changeset {
        updated: vec![RecordUpdate {
            phantom_id: record.id.clone(),
            id: id.clone(),
            booking_id: Some(created.id.clone()),
            etag: created.etag.clone(),
        }],
    })?;

    tracing::debug!(placeholder = %record.id, %id, "rebound record");
    Ok(id)
}
