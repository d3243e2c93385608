// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Mapping of grid records and deltas onto booking payloads.

use bookingsync_dataverse::BookingPayload;
use jiff::{SignedDuration, Timestamp};

use crate::event::RecordDelta;
use crate::record::BookingRecord;

/// Full payload for creating the booking behind `record`.
pub fn create_payload(record: &BookingRecord) -> BookingPayload {
    let mut payload = BookingPayload {
        name: Some(record.name.clone()),
        resource: record.resource_id.clone(),
        start_time: Some(record.start_date),
        end_time: Some(record.end_date),
        duration: Some(round_minutes(record.duration)),
        ..Default::default()
    };

    if let Some(preamble) = record.preamble.as_deref().filter(|a| !a.is_empty()) {
        add_travel(&mut payload, preamble, record.start_date);
    }

    payload
}

/// Partial payload carrying only the mirrored fields changed in `delta`.
pub fn update_payload(record: &BookingRecord, delta: &RecordDelta) -> BookingPayload {
    let mut payload = BookingPayload::default();

    if let Some(name) = &delta.name {
        payload.name = Some(name.value.clone());
    }

    if let Some(start) = &delta.start_date {
        payload.start_time = Some(start.value);
    }

    if let Some(end) = &delta.end_date {
        payload.end_time = Some(end.value);
    }

    if let Some(duration) = &delta.duration {
        payload.duration = Some(round_minutes(duration.value));
    }

    if let Some(resource) = &delta.resource_id {
        payload.resource = Some(resource.value.clone());
    }

    if let Some(preamble) = &delta.preamble {
        // Arrival follows the start as of this same delta
        let start = delta
            .start_date
            .as_ref()
            .map_or(record.start_date, |a| a.value);

        match preamble.value.as_deref() {
            Some(text) => add_travel(&mut payload, text, start),
            None => tracing::debug!("travel time cleared, leaving remote value as is"),
        }
    }

    payload
}

/// Parses a travel lead time the way the grid's integer parsing does: leading
/// whitespace, an optional sign, then digits; anything after the digits is
/// ignored, so `"15 minutes"` reads as 15.
pub fn parse_lead_minutes(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let minutes: i64 = digits.get(..end)?.parse().ok()?;
    Some(if negative { -minutes } else { minutes })
}

/// Estimated arrival for a booking starting at `start`, `minutes` of travel earlier.
pub fn arrival_time(start: Timestamp, minutes: i64) -> Option<Timestamp> {
    let secs = minutes.checked_mul(60)?;
    start.checked_sub(SignedDuration::from_secs(secs)).ok()
}

/// Rounds a duration to whole minutes, halves rounding up.
#[allow(clippy::cast_possible_truncation)]
pub fn round_minutes(duration: f64) -> i64 {
    (duration + 0.5).floor() as i64
}

fn add_travel(payload: &mut BookingPayload, text: &str, start: Timestamp) {
    let Some(minutes) = parse_lead_minutes(text) else {
        tracing::debug!(text, "travel time is not a number, skipping");
        return;
    };

    let Some(arrival) = arrival_time(start, minutes) else {
        tracing::warn!(minutes, "travel time out of range, skipping");
        return;
    };

    payload.estimated_travel_duration = Some(minutes);
    payload.estimated_arrival_time = Some(arrival);
}
