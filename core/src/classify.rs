// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::event::{ChangeKind, Collection, MutationEvent};
use crate::record::{BookingRecord, RecordId};
use crate::session::EditingSession;

/// Why an event was held back before reaching the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    /// The event carries no record, as during batch operations.
    NoRecord,

    /// The editor is open, so the change is still tentative.
    TentativeEdit,
}

/// Why an event is not mirrored at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Bookings are assigned to a single resource directly.
    Assignments,

    /// Resources are managed by the remote side.
    Resources,

    /// Dependencies have no remote counterpart.
    Dependencies,

    /// A collection this design knows nothing about.
    UnhandledCollection(String),

    /// An `events` record that does not look like a booking.
    UnrecognizedRecord,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuppressReason::NoRecord => write!(f, "no record"),
            SuppressReason::TentativeEdit => write!(f, "tentative edit in progress"),
        }
    }
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::Assignments => write!(f, "assignments are not synced"),
            IgnoreReason::Resources => write!(f, "resources are managed remotely"),
            IgnoreReason::Dependencies => write!(f, "dependencies are not synced"),
            IgnoreReason::UnhandledCollection(tag) => write!(f, "unhandled collection: {tag}"),
            IgnoreReason::UnrecognizedRecord => write!(f, "record is not a booking"),
        }
    }
}

/// Handling path for a booking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// An add; the booking is created by the first named update instead.
    AwaitCreate,

    /// An update of a placeholder.
    Create,

    /// An update of a persisted booking.
    Update,

    /// A removal.
    Delete,
}

impl Route {
    /// Path for an event of `kind` on a record identified by `id`.
    pub fn of(kind: ChangeKind, id: &RecordId) -> Self {
        match kind {
            ChangeKind::Add => Route::AwaitCreate,
            ChangeKind::Update if id.is_placeholder() => Route::Create,
            ChangeKind::Update => Route::Update,
            ChangeKind::Remove => Route::Delete,
        }
    }
}

/// Outcome of classifying one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<'a> {
    /// Held back, see [`SuppressReason`].
    Suppressed(SuppressReason),

    /// Not mirrored, see [`IgnoreReason`].
    Ignored(IgnoreReason),

    /// Handle the booking along the given path.
    Route(Route, &'a BookingRecord),
}

/// Decides how an event is handled. Never fails.
pub fn classify<'a>(session: &EditingSession, event: &'a MutationEvent) -> Decision<'a> {
    let Some(record) = &event.record else {
        tracing::debug!("skipping sync, no record");
        return Decision::Suppressed(SuppressReason::NoRecord);
    };

    // Removal has no pending state in the editor, so it always goes through
    if session.is_editing() && event.kind != ChangeKind::Remove {
        tracing::debug!(kind = %event.kind, "skipping sync, editor is open");
        return Decision::Suppressed(SuppressReason::TentativeEdit);
    }

    let reason = match &event.collection {
        Collection::Events => match record.as_booking() {
            Some(booking) => {
                let route = Route::of(event.kind, &booking.id);
                tracing::debug!(id = %booking.id, ?route, "routing booking change");
                return Decision::Route(route, booking);
            }
            None => {
                tracing::warn!(kind = %event.kind, "event record is not a booking, not synced");
                IgnoreReason::UnrecognizedRecord
            }
        },
        Collection::Assignments => IgnoreReason::Assignments,
        Collection::Resources => IgnoreReason::Resources,
        Collection::Dependencies => IgnoreReason::Dependencies,
        Collection::Other(tag) => {
            tracing::info!(collection = %tag, "unhandled collection");
            IgnoreReason::UnhandledCollection(tag.clone())
        }
    };

    tracing::debug!(collection = %event.collection, %reason, "change not synced");
    Decision::Ignored(reason)
}
