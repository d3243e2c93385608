// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use bookingsync_dataverse::{BookingId, ETag, ResourceId};
use jiff::Timestamp;

/// Prefix the scheduling grid gives to records it has not persisted yet.
pub const PLACEHOLDER_PREFIX: &str = "_generated";

/// Identifier of a record in the scheduling grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Locally generated, never persisted remotely, e.g. `_generated_1`.
    Placeholder(String),

    /// Equal to the key of the remote booking.
    Permanent(BookingId),
}

impl RecordId {
    /// Parses a grid identifier.
    pub fn parse(id: &str) -> Self {
        if id.starts_with(PLACEHOLDER_PREFIX) {
            RecordId::Placeholder(id.to_string())
        } else {
            RecordId::Permanent(BookingId::from(id))
        }
    }

    /// Whether the record has never been persisted remotely.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, RecordId::Placeholder(_))
    }

    /// The identifier as the grid knows it.
    pub fn as_str(&self) -> &str {
        match self {
            RecordId::Placeholder(id) => id,
            RecordId::Permanent(id) => id.as_str(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::parse(id)
    }
}

impl serde::Serialize for RecordId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The grid hands out numeric ids for seeded rows
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId::parse(&s),
            Raw::Number(n) => RecordId::parse(&n.to_string()),
        })
    }
}

/// A booking as held by the scheduling grid's event store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Grid identifier.
    pub id: RecordId,

    /// Key of the remote booking, once known.
    #[serde(rename = "bookableresourcebookingid", default)]
    pub booking_id: Option<BookingId>,

    /// Display name; empty until the user types one.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,

    /// Start instant.
    pub start_date: Timestamp,

    /// End instant.
    pub end_date: Timestamp,

    /// Duration in minutes, possibly fractional.
    pub duration: f64,

    /// Assigned resource; unassigned rows carry none.
    #[serde(default)]
    pub resource_id: Option<ResourceId>,

    /// Travel lead time in minutes, as free text (`"15"`, `"15 minutes"`).
    #[serde(default)]
    pub preamble: Option<String>,

    /// Version of the remote row this record was loaded from.
    #[serde(default)]
    pub etag: Option<ETag>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(name.unwrap_or_default())
}

/// The record carried by a mutation event.
///
/// Only bookings are mirrored; records of other collections are kept opaque.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Record {
    /// A booking of the `events` collection.
    Booking(Box<BookingRecord>),

    /// Any other record.
    Other(serde_json::Value),
}

impl Record {
    /// The booking, if this record is one.
    pub fn as_booking(&self) -> Option<&BookingRecord> {
        match self {
            Record::Booking(booking) => Some(booking),
            Record::Other(_) => None,
        }
    }
}

impl From<BookingRecord> for Record {
    fn from(booking: BookingRecord) -> Self {
        Record::Booking(Box::new(booking))
    }
}
