// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Dataverse authentication method.
///
/// Token acquisition happens outside this crate; a bearer token is passed
/// through as-is.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Dataverse Web API configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DataverseConfig {
    /// Web API root, e.g. `https://org.crm.dynamics.com/api/data/v9.2`.
    pub base_url: String,
    /// Entity set holding the bookings.
    #[serde(default = "default_entity_set")]
    pub entity_set: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_entity_set() -> String {
    "bookableresourcebookings".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("bookingsync-dataverse/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for DataverseConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            entity_set: default_entity_set(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
