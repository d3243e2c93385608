// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request body for booking writes.

use jiff::Timestamp;
use jiff::fmt::temporal::DateTimePrinter;
use serde::Serializer;

use crate::types::ResourceId;

static PRINTER: DateTimePrinter = DateTimePrinter::new().precision(Some(3));

/// Formats a timestamp the way the booking entity stores it: UTC, millisecond
/// precision, e.g. `2025-01-01T08:00:00.000Z`.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    PRINTER.timestamp_to_string(ts)
}

/// Fields of a `bookableresourcebooking` to write.
///
/// Unset fields are left out of the JSON body, so the same type serves the
/// full body of a create and the partial body of an update.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct BookingPayload {
    /// Booking name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Resource the booking is assigned to.
    #[serde(
        rename = "resource@odata.bind",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_binding"
    )]
    pub resource: Option<ResourceId>,

    /// Start of the booking.
    #[serde(
        rename = "starttime",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub start_time: Option<Timestamp>,

    /// End of the booking.
    #[serde(
        rename = "endtime",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub end_time: Option<Timestamp>,

    /// Duration in whole minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,

    /// Travel time to the booking, in minutes.
    #[serde(
        rename = "msdyn_estimatedtravelduration",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_travel_duration: Option<i64>,

    /// Start minus travel time.
    #[serde(
        rename = "msdyn_estimatedarrivaltime",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_timestamp"
    )]
    pub estimated_arrival_time: Option<Timestamp>,
}

impl BookingPayload {
    /// Is this payload empty, meaning no fields are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.resource.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.duration.is_none()
            && self.estimated_travel_duration.is_none()
            && self.estimated_arrival_time.is_none()
    }
}

#[allow(clippy::ref_option)]
fn serialize_timestamp<S: Serializer>(ts: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => s.serialize_str(&format_timestamp(ts)),
        None => s.serialize_none(),
    }
}

#[allow(clippy::ref_option)]
fn serialize_binding<S: Serializer>(id: &Option<ResourceId>, s: S) -> Result<S::Ok, S::Error> {
    match id {
        Some(id) => s.serialize_str(&id.binding()),
        None => s.serialize_none(),
    }
}
