// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// The name of the application.
pub const APP_NAME: &str = "bookingsync";

/// Configuration of the synchronizer.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct SyncConfig {
    /// Serialize sync calls touching the same record.
    ///
    /// When off, a second event for a record can reach the remote store
    /// while the call for the first is still pending.
    #[serde(default = "default_serialize_per_record")]
    pub serialize_per_record: bool,

    /// How many created placeholders to remember, so a late event carrying
    /// the placeholder still updates its booking instead of creating another.
    #[serde(default = "default_rebound_capacity")]
    pub rebound_capacity: usize,
}

const fn default_serialize_per_record() -> bool {
    true
}

const fn default_rebound_capacity() -> usize {
    1024
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            serialize_per_record: default_serialize_per_record(),
            rebound_capacity: default_rebound_capacity(),
        }
    }
}
