// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication, OData headers and error mapping.

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::{AuthMethod, DataverseConfig};
use crate::error::DataverseError;
use crate::response::ODataErrorBody;
use crate::types::ETag;

/// HTTP client for Dataverse Web API operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: DataverseConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: DataverseConfig) -> Result<Self, DataverseError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with authentication and OData headers.
    pub fn build_request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .header("Accept", "application/json")
            .header("OData-MaxVersion", "4.0")
            .header("OData-Version", "4.0");

        match &self.config.auth {
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, DataverseError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());

        let (code, message) = match serde_json::from_str::<ODataErrorBody>(&text) {
            Ok(body) => (Some(body.error.code), body.error.message),
            Err(_) => (None, text),
        };

        tracing::debug!(%status, ?code, message, "request rejected");
        match status {
            StatusCode::PRECONDITION_FAILED => Err(DataverseError::PreconditionFailed(message)),
            status => Err(DataverseError::Api {
                status: status.as_u16(),
                code,
                message,
            }),
        }
    }

    /// Adds If-Match header for conditional updates.
    pub fn if_match(req: RequestBuilder, etag: &ETag) -> RequestBuilder {
        req.header("If-Match", etag.as_str())
    }

    /// Extracts the `ETag` from response headers, if present.
    pub fn extract_etag(resp: &Response) -> Option<ETag> {
        resp.headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .map(ETag::from_odata)
    }
}
