// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Booking service double that records every call.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bookingsync_core::BookingService;
use bookingsync_dataverse::{BookingId, BookingPayload, CreatedBooking, DataverseError};

/// A call received by [`RecordingService`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(BookingPayload),
    Update(BookingId, BookingPayload),
    Delete(BookingId),
}

/// Records calls, hands out queued booking keys and optionally fails.
#[derive(Debug, Default)]
pub struct RecordingService {
    calls: Mutex<Vec<Call>>,
    ids: Mutex<VecDeque<String>>,
    failures: Mutex<VecDeque<DataverseError>>,
    delay: Option<Duration>,
}

impl RecordingService {
    /// A service handing out the given booking keys, in order.
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(ToString::to_string).collect()),
            ..Default::default()
        }
    }

    /// Makes every call take `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fails the next call with `err`.
    pub fn fail_next(&self, err: DataverseError) {
        self.failures.lock().unwrap().push_back(err);
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: Call) -> Result<(), DataverseError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.lock().unwrap().pop_front();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BookingService for RecordingService {
    async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError> {
        self.answer(Call::Create(payload.clone())).await?;
        let id = self
            .ids
            .lock()
            .unwrap()
            .pop_front()
            .expect("no booking id left to hand out");
        Ok(CreatedBooking {
            id: BookingId::new(id),
            etag: None,
        })
    }

    async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError> {
        self.answer(Call::Update(id.clone(), payload.clone())).await
    }

    async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError> {
        self.answer(Call::Delete(id.clone())).await
    }
}
