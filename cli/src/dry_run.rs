// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use bookingsync_core::BookingService;
use bookingsync_dataverse::{BookingId, BookingPayload, CreatedBooking, DataverseError};
use uuid::Uuid;

/// Booking service that logs each request instead of sending it.
///
/// Creates hand out fresh random keys, so a replay runs through the same
/// rebinding it would against the real service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunService;

#[async_trait]
impl BookingService for DryRunService {
    async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError> {
        let body = serde_json::to_string(payload)?;
        let id = BookingId::new(Uuid::new_v4().to_string());
        tracing::info!(%id, %body, "dry run: POST booking");
        Ok(CreatedBooking { id, etag: None })
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError> {
        let body = serde_json::to_string(payload)?;
        tracing::info!(%id, %body, "dry run: PATCH booking");
        Ok(())
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError> {
        tracing::info!(%id, "dry run: DELETE booking");
        Ok(())
    }
}
