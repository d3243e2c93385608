// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use bookingsync_dataverse::{BookingId, DataverseError};

use crate::record::RecordId;
use crate::store::StoreError;

/// Failure of a sync call. Local state is left as it was.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The booking service rejected the call.
    #[error(transparent)]
    Remote(#[from] DataverseError),

    /// The booking was created but the local record could not be rebound.
    #[error("failed to rebind local record: {0}")]
    Store(#[from] StoreError),

    /// A second create for a placeholder that already has a booking. The
    /// extra booking exists remotely but nothing local refers to it.
    #[error("{placeholder} was already created as {booking}, booking {orphan} is orphaned")]
    DuplicateCreate {
        /// The placeholder both creates were issued for.
        placeholder: RecordId,
        /// Booking the placeholder is bound to.
        booking: BookingId,
        /// Booking created by the losing call.
        orphan: BookingId,
    },
}
