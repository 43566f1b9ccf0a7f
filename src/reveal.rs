// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Click guard for the obfuscated phone number display.
//!
//! The numbers ship pre-split so scrapers reading the page source do not
//! see them. A click assembles and reveals them once; bursts of clicks
//! are counted and fed to the bot heuristics.

use crate::config::SecurityConfig;
use serde::Serialize;
use tracing::{debug, warn};

const PRIMARY_DIGITS: [char; 12] = ['0', '9', '7', '-', '6', '9', '3', '-', '5', '4', '6', '5'];
const SECONDARY_DIGITS: [char; 12] = ['0', '9', '3', '-', '6', '9', '4', '-', '2', '4', '5', '6'];

/// Click cadence observed on the phone display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuspiciousActivity {
    pub rapid_clicks: u32,
    pub last_click_ms: u64,
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Replace the display text with these numbers
    Revealed(String),
    /// Click burst; nothing shown
    Suppressed,
    /// Numbers already shown; the click only feeds the counter
    Detached,
}

/// One-shot phone reveal handler.
#[derive(Debug, Clone)]
pub struct PhoneReveal {
    activity: SuspiciousActivity,
    rapid_window_ms: u64,
    suppress_after: u32,
    revealed: bool,
}

impl PhoneReveal {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            activity: SuspiciousActivity::default(),
            rapid_window_ms: config.rapid_click_window_ms,
            suppress_after: config.reveal_suppress_after,
            revealed: false,
        }
    }

    /// Handle a click at `now_ms`.
    ///
    /// Once the numbers are shown the handler is detached: later clicks
    /// are ignored and leave the click counter untouched.
    pub fn on_click(&mut self, now_ms: u64) -> ClickOutcome {
        if self.revealed {
            return ClickOutcome::Detached;
        }

        let since_last = now_ms.saturating_sub(self.activity.last_click_ms);
        let rapid = since_last < self.rapid_window_ms;
        if rapid {
            self.activity.rapid_clicks += 1;
        } else {
            self.activity.rapid_clicks = 0;
        }

        if rapid && self.activity.rapid_clicks > self.suppress_after {
            warn!(
                rapid_clicks = self.activity.rapid_clicks,
                "Suppressing phone reveal after click burst"
            );
            return ClickOutcome::Suppressed;
        }

        self.activity.last_click_ms = now_ms;
        self.revealed = true;
        debug!("Phone numbers revealed");
        ClickOutcome::Revealed(revealed_text())
    }

    /// Rapid-click counter as seen by the bot heuristics.
    pub fn rapid_clicks(&self) -> u32 {
        self.activity.rapid_clicks
    }

    pub fn activity(&self) -> SuspiciousActivity {
        self.activity
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

fn revealed_text() -> String {
    let primary: String = PRIMARY_DIGITS.iter().collect();
    let secondary: String = SECONDARY_DIGITS.iter().collect();
    format!("{primary}, {secondary}")
}
