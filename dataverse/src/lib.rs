// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dataverse Web API client for bookable resource bookings.
//!
//! Covers the three writes the scheduling grid needs: create, partial update
//! and delete of the `bookableresourcebookings` entity.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod client;
mod config;
mod error;
mod http;
mod payload;
mod response;
mod types;

pub use crate::client::{CreatedBooking, DataverseClient};
pub use crate::config::{AuthMethod, DataverseConfig};
pub use crate::error::DataverseError;
pub use crate::payload::{BookingPayload, format_timestamp};
pub use crate::types::{BookingId, ETag, ResourceId};
