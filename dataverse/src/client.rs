// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Dataverse client for booking operations.

use std::sync::Arc;

use reqwest::{Method, StatusCode};

use crate::config::DataverseConfig;
use crate::error::DataverseError;
use crate::http::HttpClient;
use crate::payload::BookingPayload;
use crate::response::CreatedBookingBody;
use crate::types::{BookingId, ETag};

/// Dataverse client for writing `bookableresourcebookings`.
///
/// # Example
///
/// ```ignore
/// use bookingsync_dataverse::{AuthMethod, BookingPayload, DataverseClient, DataverseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DataverseConfig {
///     base_url: "https://org.crm.dynamics.com/api/data/v9.2".to_string(),
///     auth: AuthMethod::Bearer {
///         token: "...".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let client = DataverseClient::new(config)?;
/// let payload = BookingPayload {
///     name: Some("Visit".to_string()),
///     ..Default::default()
/// };
/// let created = client.create_booking(&payload).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DataverseClient {
    http: Arc<HttpClient>,
    config: DataverseConfig,
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBooking {
    /// Key assigned by the service.
    pub id: BookingId,
    /// Version of the new row, when the service reported one.
    pub etag: Option<ETag>,
}

impl DataverseClient {
    /// Creates a new Dataverse client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or HTTP client
    /// initialization fails.
    pub fn new(config: DataverseConfig) -> Result<Self, DataverseError> {
        if config.base_url.trim().is_empty() {
            return Err(DataverseError::Config("base_url must not be empty".to_string()));
        }

        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Creates a booking and returns the key the service assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or the response carries no
    /// booking key.
    pub async fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> Result<CreatedBooking, DataverseError> {
        let url = self.collection_url();
        tracing::debug!(url, "creating booking");

        let resp = self
            .http
            .execute(
                self.http
                    .build_request(Method::POST, &url)
                    .header("Prefer", "return=representation")
                    .json(payload),
            )
            .await?;

        let header_etag = HttpClient::extract_etag(&resp);

        if resp.status() == StatusCode::NO_CONTENT {
            // Service ignored the Prefer header; the key is only in the entity URL
            let id = resp
                .headers()
                .get("OData-EntityId")
                .and_then(|v| v.to_str().ok())
                .and_then(BookingId::from_entity_url)
                .ok_or_else(|| {
                    DataverseError::InvalidResponse("Missing OData-EntityId header".to_string())
                })?;
            return Ok(CreatedBooking {
                id,
                etag: header_etag,
            });
        }

        let text = resp.text().await?;
        let body: CreatedBookingBody = serde_json::from_str(&text)
            .map_err(|e| DataverseError::InvalidResponse(format!("Unexpected body: {e}")))?;

        Ok(CreatedBooking {
            id: body.id,
            etag: body.etag.as_deref().map(ETag::from_odata).or(header_etag),
        })
    }

    /// Updates the given fields of an existing booking.
    ///
    /// The request is conditional on the booking existing, so a deleted
    /// booking is never recreated by an update.
    ///
    /// # Errors
    ///
    /// Returns [`DataverseError::NotFound`] if the booking doesn't exist, or
    /// another error if the request is rejected.
    pub async fn update_booking(
        &self,
        id: &BookingId,
        payload: &BookingPayload,
    ) -> Result<(), DataverseError> {
        let url = self.entity_url(id);
        tracing::debug!(url, "updating booking");

        let req = self.http.build_request(Method::PATCH, &url).json(payload);
        let _ = self
            .http
            .execute(HttpClient::if_match(req, &ETag::any()))
            .await
            .map_err(|e| e.or_not_found(id))?;

        Ok(())
    }

    /// Deletes a booking.
    ///
    /// # Errors
    ///
    /// Returns [`DataverseError::NotFound`] if the booking doesn't exist, or
    /// another error if the request is rejected.
    pub async fn delete_booking(&self, id: &BookingId) -> Result<(), DataverseError> {
        let url = self.entity_url(id);
        tracing::debug!(url, "deleting booking");

        let _ = self
            .http
            .execute(self.http.build_request(Method::DELETE, &url))
            .await
            .map_err(|e| e.or_not_found(id))?;

        Ok(())
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.entity_set
        )
    }

    fn entity_url(&self, id: &BookingId) -> String {
        format!("{}({id})", self.collection_url())
    }
}
