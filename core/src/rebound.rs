// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Placeholders that already have a remote booking.

use std::collections::{HashMap, VecDeque};

use bookingsync_dataverse::BookingId;

/// Placeholder → key of the booking created for it, oldest evicted first.
#[derive(Debug)]
pub(crate) struct Rebound {
    capacity: usize,
    keys: HashMap<String, BookingId>,
    order: VecDeque<String>,
}

impl Rebound {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            keys: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, placeholder: &str) -> Option<&BookingId> {
        self.keys.get(placeholder)
    }

    /// Records the booking of a placeholder that has none yet.
    pub fn insert(&mut self, placeholder: &str, booking: BookingId) {
        if self.keys.contains_key(placeholder) {
            return;
        }

        self.keys.insert(placeholder.to_string(), booking);
        self.order.push_back(placeholder.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                tracing::trace!(placeholder = %oldest, "forgetting rebound placeholder");
                self.keys.remove(&oldest);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.keys.len()
    }
}
