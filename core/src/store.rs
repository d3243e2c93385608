// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The grid's in-memory booking store, as seen by the synchronizer.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use bookingsync_dataverse::{BookingId, ETag};
use tokio::sync::broadcast;

use crate::record::{BookingRecord, RecordId};

/// Local store errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The changeset refers to a record the store does not hold.
    #[error("record not found in local store: {0}")]
    UnknownRecord(RecordId),

    /// The changeset would give two records the same identifier.
    #[error("record already exists in local store: {0}")]
    DuplicateRecord(RecordId),
}

/// One record rewritten by a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    /// Identifier the record currently has.
    pub phantom_id: RecordId,

    /// Identifier the record gets.
    pub id: RecordId,

    /// Remote key to store on the record.
    pub booking_id: Option<BookingId>,

    /// Remote version to store on the record, if known.
    pub etag: Option<ETag>,
}

/// Record updates applied as a single transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    /// Records to rewrite.
    pub updated: Vec<RecordUpdate>,
}

/// Store the synchronizer writes identity changes back into.
pub trait LocalStore: Send + Sync {
    /// Applies all updates of `changeset` or none of them.
    ///
    /// # Errors
    ///
    /// Returns an error if an update refers to an unknown record.
    fn apply_changeset(&self, changeset: Changeset) -> Result<(), StoreError>;
}

impl<T: LocalStore + ?Sized> LocalStore for Arc<T> {
    fn apply_changeset(&self, changeset: Changeset) -> Result<(), StoreError> {
        (**self).apply_changeset(changeset)
    }
}

/// Notification sent to observers of an [`EventStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreNotification {
    /// A record was added or replaced.
    Upserted(RecordId),

    /// A record was removed.
    Removed(RecordId),

    /// A changeset was applied; `(old, new)` identifier pairs.
    Changeset(Vec<(RecordId, RecordId)>),
}

/// In-memory booking store keyed by grid identifier.
#[derive(Debug)]
pub struct EventStore {
    records: RwLock<HashMap<RecordId, BookingRecord>>,
    notify: broadcast::Sender<StoreNotification>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(64);
        Self {
            records: RwLock::new(HashMap::new()),
            notify,
        }
    }

    /// Subscribes to store notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreNotification> {
        self.notify.subscribe()
    }

    /// Adds or replaces a record.
    pub fn upsert(&self, record: BookingRecord) {
        let id = record.id.clone();
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), record);
        self.publish(StoreNotification::Upserted(id));
    }

    /// Removes a record, returning it if present.
    pub fn remove(&self, id: &RecordId) -> Option<BookingRecord> {
        let removed = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            self.publish(StoreNotification::Removed(id.clone()));
        }
        removed
    }

    /// Returns a copy of the record with the given identifier.
    pub fn get(&self, id: &RecordId) -> Option<BookingRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn publish(&self, notification: StoreNotification) {
        // No receivers is fine
        let _ = self.notify.send(notification);
    }
}

impl LocalStore for EventStore {
    fn apply_changeset(&self, changeset: Changeset) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        for update in &changeset.updated {
            if !records.contains_key(&update.phantom_id) {
                return Err(StoreError::UnknownRecord(update.phantom_id.clone()));
            }
            if update.id != update.phantom_id && records.contains_key(&update.id) {
                return Err(StoreError::DuplicateRecord(update.id.clone()));
            }
        }

        let mut rebound = Vec::with_capacity(changeset.updated.len());
        for update in changeset.updated {
            let Some(mut record) = records.remove(&update.phantom_id) else {
                continue;
            };

            record.id = update.id.clone();
            record.booking_id = update.booking_id;
            if update.etag.is_some() {
                record.etag = update.etag;
            }
            records.insert(update.id.clone(), record);
            rebound.push((update.phantom_id, update.id));
        }
        drop(records);

        tracing::debug!(count = rebound.len(), "applied changeset");
        self.publish(StoreNotification::Changeset(rebound));
        Ok(())
    }
}
