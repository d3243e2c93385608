// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use bookingsync_core::MutationEvent;

/// One line of a recorded grid session.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// The event editor opened or closed.
    Editor {
        /// Whether the editor is now open.
        open: bool,
    },

    /// The grid reported a mutation.
    Change(MutationEvent),
}

/// Parses a JSON-lines session. Blank lines and lines starting with `#` are
/// skipped.
pub fn parse_script(text: &str) -> Result<Vec<Step>, Box<dyn Error>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| Box::<dyn Error>::from(format!("line {}: {e}", i + 1)))
        })
        .collect()
}
