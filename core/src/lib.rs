// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Mirrors edits made in a scheduling grid into a remote booking service.

mod classify;
mod config;
mod error;
mod event;
mod identity;
mod in_flight;
mod rebound;
mod record;
mod service;
mod session;
mod store;
mod sync;
mod translate;

pub use crate::classify::{Decision, IgnoreReason, Route, SuppressReason, classify};
pub use crate::config::{APP_NAME, SyncConfig};
pub use crate::error::SyncError;
pub use crate::event::{Change, ChangeKind, Collection, MutationEvent, RecordDelta};
pub use crate::identity::rebind;
pub use crate::record::{BookingRecord, PLACEHOLDER_PREFIX, Record, RecordId};
pub use crate::service::BookingService;
pub use crate::session::EditingSession;
pub use crate::store::{
    Changeset, EventStore, LocalStore, RecordUpdate, StoreError, StoreNotification,
};
pub use crate::sync::{Outcome, SkipReason, Synchronizer};
pub use crate::translate::{
    arrival_time, create_payload, parse_lead_minutes, round_minutes, update_payload,
};
