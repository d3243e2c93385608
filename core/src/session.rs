// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Whether the user is composing an edit in the grid's modal editor.
///
/// Owned by the host and handed to every sync call. While open, every
/// keystroke in the editor shows up as an update of the in-memory record;
/// none of those should reach the remote store until the editor closes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditingSession {
    editing: bool,
}

impl EditingSession {
    /// A session with the editor closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the editor as opened or closed (saved or cancelled).
    pub fn set_editing(&mut self, open: bool) {
        self.editing = open;
    }

    /// Whether the editor is open.
    pub fn is_editing(&self) -> bool {
        self.editing
    }
}
