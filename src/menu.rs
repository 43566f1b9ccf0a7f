// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mobile navigation menu state.

use crate::widgets::elements;

/// Open/closed state of the `navLinks` menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    active: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Menu button pressed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// A navigation link was followed; always closes.
    pub fn on_link_click(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn element_id(&self) -> &'static str {
        elements::NAV_LINKS
    }
}
