// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Response bodies returned by the Web API.

use crate::types::BookingId;

/// OData error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, serde::Deserialize)]
pub struct ODataErrorBody {
    pub error: ODataError,
}

#[derive(Debug, serde::Deserialize)]
pub struct ODataError {
    #[serde(default)]
    pub code: String,
    pub message: String,
}

/// Representation returned by a create with `Prefer: return=representation`.
///
/// Only the fields the client needs are read.
#[derive(Debug, serde::Deserialize)]
pub struct CreatedBookingBody {
    #[serde(rename = "bookableresourcebookingid")]
    pub id: BookingId,
    #[serde(rename = "@odata.etag", default)]
    pub etag: Option<String>,
}
