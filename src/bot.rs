// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Bot heuristics evaluated once per submit attempt.
//!
//! Three signals, checked in order, first match wins:
//! 1. Honeypot fields hidden from humans carry a value
//! 2. The form was submitted faster than a person can fill it
//! 3. The phone reveal saw an abnormal burst of clicks

use crate::config::SecurityConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Values of the hidden honeypot inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoneypotFields {
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub business_email: String,
    #[serde(default)]
    pub company_name: String,
}

impl HoneypotFields {
    /// Name of the first filled honeypot, if any.
    pub fn tripped(&self) -> Option<&'static str> {
        [
            ("website", &self.website),
            ("business_email", &self.business_email),
            ("company_name", &self.company_name),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_empty())
        .map(|(name, _)| name)
    }
}

/// Which heuristic fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum BotSignal {
    /// A hidden field was filled
    Honeypot { field: &'static str },
    /// Submitted before the minimum fill time elapsed
    TooFast { elapsed_ms: u64 },
    /// Too many rapid clicks on the phone reveal
    RapidClicks { count: u32 },
}

impl std::fmt::Display for BotSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Honeypot { field } => write!(f, "honeypot field {field} filled"),
            Self::TooFast { elapsed_ms } => write!(f, "form filled in {elapsed_ms} ms"),
            Self::RapidClicks { count } => write!(f, "{count} rapid clicks"),
        }
    }
}

/// Outcome of the bot heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotVerdict {
    Human,
    Suspected(BotSignal),
}

impl BotVerdict {
    pub fn is_bot(&self) -> bool {
        matches!(self, BotVerdict::Suspected(_))
    }
}

/// Inputs observed for one submit attempt.
#[derive(Debug, Clone, Copy)]
pub struct SubmitObservation<'a> {
    pub honeypots: &'a HoneypotFields,
    pub loaded_at_ms: u64,
    pub now_ms: u64,
    pub rapid_clicks: u32,
}

/// Read-only bot detector.
#[derive(Debug, Clone)]
pub struct BotDetector {
    min_fill_time_ms: u64,
    max_rapid_clicks: u32,
}

impl BotDetector {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            min_fill_time_ms: config.min_fill_time_ms,
            max_rapid_clicks: config.max_rapid_clicks,
        }
    }

    /// Run the heuristics in order and report the first that fires.
    pub fn detect(&self, observation: &SubmitObservation<'_>) -> BotVerdict {
        if let Some(field) = observation.honeypots.tripped() {
            debug!(field, "Honeypot tripped");
            return BotVerdict::Suspected(BotSignal::Honeypot { field });
        }

        // A clock that moved backwards counts as zero elapsed time.
        let elapsed_ms = observation.now_ms.saturating_sub(observation.loaded_at_ms);
        if elapsed_ms < self.min_fill_time_ms {
            debug!(elapsed_ms, min = self.min_fill_time_ms, "Form filled too fast");
            return BotVerdict::Suspected(BotSignal::TooFast { elapsed_ms });
        }

        if observation.rapid_clicks > self.max_rapid_clicks {
            debug!(count = observation.rapid_clicks, "Rapid click burst");
            return BotVerdict::Suspected(BotSignal::RapidClicks {
                count: observation.rapid_clicks,
            });
        }

        BotVerdict::Human
    }
}
