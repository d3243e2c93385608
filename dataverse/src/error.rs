// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::types::BookingId;

/// Dataverse client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DataverseError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service rejected the request.
    #[error("Dataverse rejected the request ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// OData error code, when the body carried one.
        code: Option<String>,
        /// Error message from the body, or the raw body text.
        message: String,
    },

    /// Booking not found.
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    /// Precondition failed (`ETag` mismatch).
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// JSON encoding/decoding error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid response from server.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataverseError {
    /// Maps a 404 rejection to [`DataverseError::NotFound`] for the given booking.
    #[must_use]
    pub(crate) fn or_not_found(self, id: &BookingId) -> Self {
        match self {
            Self::Api { status: 404, .. } => Self::NotFound(id.clone()),
            e => e,
        }
    }
}

impl From<reqwest::Error> for DataverseError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for DataverseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
