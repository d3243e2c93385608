// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use bookingsync_dataverse::{
    BookingId, BookingPayload, CreatedBooking, DataverseClient, DataverseError,
};

/// Remote store the bookings are mirrored into.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Creates a booking and returns its new key.
    async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError>;

    /// Writes the fields set in `payload` to an existing booking.
    async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError>;

    /// Deletes a booking.
    async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError>;
}

#[async_trait]
impl BookingService for DataverseClient {
    async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError> {
        DataverseClient::create_booking(self, payload).await
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError> {
        DataverseClient::update_booking(self, id, payload).await
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError> {
        DataverseClient::delete_booking(self, id).await
    }
}

#[async_trait]
impl<T: BookingService + ?Sized> BookingService for Arc<T> {
    async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError> {
        (**self).create_booking(payload).await
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError> {
        (**self).update_booking(id, payload).await
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError> {
        (**self).delete_booking(id).await
    }
}
