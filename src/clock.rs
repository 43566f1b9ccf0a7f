// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wall-clock capability.
//!
//! Timestamps are epoch milliseconds so they can be stored as the same
//! decimal strings the site has always written to local storage.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of the current time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Real time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Hand-driven clock. Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Format a timestamp the way a `th-TH` locale renders date and time:
/// day/month/Buddhist-era year, then zero-padded 24-hour time.
pub fn thai_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!(
        "{}/{}/{} {:02}:{:02}:{:02}",
        at.day(),
        at.month(),
        at.year() + 543,
        at.hour(),
        at.minute(),
        at.second()
    )
}

/// Local-time rendering of an epoch millisecond timestamp.
pub fn local_thai_timestamp(epoch_ms: u64) -> String {
    let millis = i64::try_from(epoch_ms).unwrap_or(i64::MAX);
    match Local.timestamp_millis_opt(millis).single() {
        Some(at) => thai_timestamp(&at),
        None => thai_timestamp(&Local::now()),
    }
}
