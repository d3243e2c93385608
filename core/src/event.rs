// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use bookingsync_dataverse::ResourceId;
use jiff::Timestamp;

use crate::record::{BookingRecord, Record};

/// Kind of state transition reported by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A record was added.
    Add,

    /// Fields of a record changed.
    Update,

    /// A record was removed.
    Remove,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Add => write!(f, "add"),
            ChangeKind::Update => write!(f, "update"),
            ChangeKind::Remove => write!(f, "remove"),
        }
    }
}

/// Logical collection of the grid a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Collection {
    /// Bookings.
    Events,

    /// Event-to-resource assignments.
    Assignments,

    /// Bookable resources.
    Resources,

    /// Links between events.
    Dependencies,

    /// Anything else the grid may report.
    Other(String),
}

impl Collection {
    /// Tag the grid uses for this collection.
    pub fn as_str(&self) -> &str {
        match self {
            Collection::Events => "events",
            Collection::Assignments => "assignments",
            Collection::Resources => "resources",
            Collection::Dependencies => "dependencies",
            Collection::Other(tag) => tag,
        }
    }
}

impl From<String> for Collection {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "events" => Collection::Events,
            "assignments" => Collection::Assignments,
            "resources" => Collection::Resources,
            "dependencies" => Collection::Dependencies,
            _ => Collection::Other(tag),
        }
    }
}

impl From<&str> for Collection {
    fn from(tag: &str) -> Self {
        tag.to_string().into()
    }
}

impl From<Collection> for String {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Other(tag) => tag,
            c => c.as_str().to_string(),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Previous and new value of one field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Change<T> {
    /// Value before the mutation, when the grid reported it.
    #[serde(rename = "oldValue")]
    pub old_value: Option<T>,

    /// Value after the mutation.
    pub value: T,
}

impl<T> Change<T> {
    /// A change to `value` with no recorded previous value.
    pub fn to(value: T) -> Self {
        Self {
            old_value: None,
            value,
        }
    }
}

/// Fields changed by an update, one slot per mirrored field.
///
/// Fields the booking service does not mirror still count towards emptiness,
/// but never reach the remote store.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordDelta {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Change<String>>,

    /// Start instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Change<Timestamp>>,

    /// End instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Change<Timestamp>>,

    /// Duration in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Change<f64>>,

    /// Assigned resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<Change<ResourceId>>,

    /// Travel lead time; `None` when cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<Change<Option<String>>>,

    /// Changed fields with no remote counterpart, e.g. `cls` or `iconCls`.
    #[serde(flatten)]
    pub unmirrored: BTreeMap<String, serde_json::Value>,
}

impl RecordDelta {
    /// Is this delta empty, meaning no fields changed
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.duration.is_none()
            && self.resource_id.is_none()
            && self.preamble.is_none()
            && self.unmirrored.is_empty()
    }
}

/// One state transition reported by the grid, consumed exactly once.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MutationEvent {
    /// What happened.
    #[serde(alias = "action")]
    pub kind: ChangeKind,

    /// The affected record; absent for some batch-internal notifications.
    #[serde(default)]
    pub record: Option<Record>,

    /// Changed fields; empty for add and remove.
    #[serde(default)]
    pub changes: RecordDelta,

    /// Collection the record belongs to.
    #[serde(alias = "store")]
    pub collection: Collection,
}

impl MutationEvent {
    /// An event on the `events` collection.
    pub fn booking(kind: ChangeKind, record: BookingRecord, changes: RecordDelta) -> Self {
        Self {
            kind,
            record: Some(record.into()),
            changes,
            collection: Collection::Events,
        }
    }
}
