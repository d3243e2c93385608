// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use bookingsync_dataverse::BookingId;

use crate::classify::{Decision, IgnoreReason, Route, SuppressReason, classify};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::event::MutationEvent;
use crate::identity;
use crate::in_flight::InFlight;
use crate::rebound::Rebound;
use crate::record::{BookingRecord, RecordId};
use crate::service::BookingService;
use crate::session::EditingSession;
use crate::store::LocalStore;
use crate::translate;

/// Why a routed booking event needed no remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// An add; the first named update creates the booking.
    AwaitingCreate,

    /// A placeholder without a name yet.
    Unnamed,

    /// An update with no changed fields.
    EmptyDelta,

    /// Only fields without a remote counterpart changed.
    NothingMirrored,

    /// A persisted record that carries no remote key.
    NoRemoteId,

    /// Removal of a record that never reached the remote store.
    NeverPersisted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AwaitingCreate => write!(f, "waiting for the first named update"),
            SkipReason::Unnamed => write!(f, "no name set yet"),
            SkipReason::EmptyDelta => write!(f, "no changes"),
            SkipReason::NothingMirrored => write!(f, "no mirrored field changed"),
            SkipReason::NoRemoteId => write!(f, "record has no remote id"),
            SkipReason::NeverPersisted => write!(f, "record was never saved remotely"),
        }
    }
}

/// What a sync call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Held back before classification finished.
    Suppressed(SuppressReason),

    /// Not mirrored.
    Ignored(IgnoreReason),

    /// Routed, but nothing to send.
    Skipped(SkipReason),

    /// A booking was created and the placeholder rebound to its key.
    Created {
        /// Identifier the record had before.
        placeholder: RecordId,
        /// Key of the new booking, now also the record's identifier.
        booking: BookingId,
    },

    /// A booking was updated.
    Updated(BookingId),

    /// A booking was deleted.
    Deleted(BookingId),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Suppressed(reason) => write!(f, "suppressed: {reason}"),
            Outcome::Ignored(reason) => write!(f, "ignored: {reason}"),
            Outcome::Skipped(reason) => write!(f, "skipped: {reason}"),
            Outcome::Created {
                placeholder,
                booking,
            } => write!(f, "created {booking} (was {placeholder})"),
            Outcome::Updated(id) => write!(f, "updated {id}"),
            Outcome::Deleted(id) => write!(f, "deleted {id}"),
        }
    }
}

/// Mirrors grid mutations into the booking service.
///
/// Call [`Synchronizer::synchronize`] once per mutation event, in the order
/// the grid produced them.
#[derive(Debug)]
pub struct Synchronizer<C, S> {
    service: C,
    store: S,
    config: SyncConfig,
    in_flight: InFlight,
    rebound: Mutex<Rebound>,
}

impl<C: BookingService, S: LocalStore> Synchronizer<C, S> {
    /// Creates a synchronizer writing to `service` and rebinding in `store`.
    pub fn new(service: C, store: S, config: SyncConfig) -> Self {
        Self {
            service,
            store,
            config,
            in_flight: InFlight::default(),
            rebound: Mutex::new(Rebound::new(config.rebound_capacity)),
        }
    }

    /// The booking service.
    pub fn service(&self) -> &C {
        &self.service
    }

    /// The local store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mirrors one mutation event.
    ///
    /// No-ops and skipped events return `Ok`; only a failed remote call or a
    /// failed rebind is an error, and it is returned as-is without retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking service rejects the call, or if the
    /// local record cannot be rebound after a create.
    #[tracing::instrument(skip_all, fields(kind = %event.kind, collection = %event.collection))]
    pub async fn synchronize(
        &self,
        session: &EditingSession,
        event: &MutationEvent,
    ) -> Result<Outcome, SyncError> {
        let (route, record) = match classify(session, event) {
            Decision::Suppressed(reason) => return Ok(Outcome::Suppressed(reason)),
            Decision::Ignored(reason) => return Ok(Outcome::Ignored(reason)),
            Decision::Route(route, record) => (route, record),
        };

        let _permit = if self.config.serialize_per_record {
            Some(self.in_flight.acquire(record.id.as_str()).await)
        } else {
            None
        };

        let record = self.resolve(record);
        let route = match &record {
            Cow::Owned(record) => Route::of(event.kind, &record.id),
            Cow::Borrowed(_) => route,
        };

        let result = match route {
            Route::AwaitCreate => {
                tracing::debug!(id = %record.id, "add, waiting for update with a name");
                Ok(Outcome::Skipped(SkipReason::AwaitingCreate))
            }
            Route::Create => self.create(&record).await,
            Route::Update => self.update(&record, event).await,
            Route::Delete => self.delete(&record).await,
        };

        if let Err(err) = &result {
            tracing::error!(id = %record.id, %err, "failed to sync booking");
        }
        result
    }

    async fn create(&self, record: &BookingRecord) -> Result<Outcome, SyncError> {
        if record.name.is_empty() {
            tracing::debug!(id = %record.id, "skipping create, no name set yet");
            return Ok(Outcome::Skipped(SkipReason::Unnamed));
        }

        tracing::info!(id = %record.id, "creating booking");
        let payload = translate::create_payload(record);
        let created = self.service.create_booking(&payload).await?;
        tracing::info!(id = %record.id, booking = %created.id, "booking created");

        // Binding and rebinding happen under one lock, so a racing create
        // for the same placeholder sees the winner's key
        let mut rebound = self.rebound.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(booking) = rebound.get(record.id.as_str()) {
            tracing::warn!(id = %record.id, %booking, orphan = %created.id, "duplicate create");
            return Err(SyncError::DuplicateCreate {
                placeholder: record.id.clone(),
                booking: booking.clone(),
                orphan: created.id,
            });
        }
        rebound.insert(record.id.as_str(), created.id.clone());
        identity::rebind(&self.store, record, &created)?;
        drop(rebound);

        Ok(Outcome::Created {
            placeholder: record.id.clone(),
            booking: created.id,
        })
    }

    async fn update(
        &self,
        record: &BookingRecord,
        event: &MutationEvent,
    ) -> Result<Outcome, SyncError> {
        if event.changes.is_empty() {
            tracing::debug!(id = %record.id, "skipping update, no changes");
            return Ok(Outcome::Skipped(SkipReason::EmptyDelta));
        }

        let payload = translate::update_payload(record, &event.changes);
        if payload.is_empty() {
            tracing::debug!(id = %record.id, "skipping update, no mirrored field changed");
            return Ok(Outcome::Skipped(SkipReason::NothingMirrored));
        }

        let Some(booking) = &record.booking_id else {
            tracing::debug!(id = %record.id, "skipping update, record has no remote id");
            return Ok(Outcome::Skipped(SkipReason::NoRemoteId));
        };

        self.service.update_booking(booking, &payload).await?;
        tracing::info!(%booking, "booking updated");
        Ok(Outcome::Updated(booking.clone()))
    }

    async fn delete(&self, record: &BookingRecord) -> Result<Outcome, SyncError> {
        if record.id.is_placeholder() {
            tracing::debug!(id = %record.id, "skipping delete, never saved remotely");
            return Ok(Outcome::Skipped(SkipReason::NeverPersisted));
        }

        let Some(booking) = &record.booking_id else {
            tracing::debug!(id = %record.id, "skipping delete, record has no remote id");
            return Ok(Outcome::Skipped(SkipReason::NoRemoteId));
        };

        self.service.delete_booking(booking).await?;
        tracing::info!(%booking, "booking deleted");
        Ok(Outcome::Deleted(booking.clone()))
    }

    /// Swaps a stale placeholder snapshot for the booking created for it.
    fn resolve<'a>(&self, record: &'a BookingRecord) -> Cow<'a, BookingRecord> {
        let RecordId::Placeholder(placeholder) = &record.id else {
            return Cow::Borrowed(record);
        };

        let rebound = self.rebound.lock().unwrap_or_else(PoisonError::into_inner);
        match rebound.get(placeholder) {
            Some(booking) => {
                tracing::debug!(%placeholder, %booking, "placeholder already created");
                let mut record = record.clone();
                record.id = RecordId::Permanent(booking.clone());
                record.booking_id = Some(booking.clone());
                Cow::Owned(record)
            }
            None => Cow::Borrowed(record),
        }
    }
}
