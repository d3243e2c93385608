// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - A recording booking service
//! - Test data factories (fixtures)

mod fixtures;
mod service;

#[allow(unused_imports)]
pub use fixtures::{changes, remove, synchronizer, update, visit};
#[allow(unused_imports)]
pub use service::{Call, RecordingService};
