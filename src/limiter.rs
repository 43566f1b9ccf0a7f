// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Persisted submission limiter.
//!
//! Counts accepted submissions in a key/value store that outlives the
//! page. Once the count reaches the configured maximum every further
//! submit is refused. The count only ever grows; an operator `reset`
//! is the only way back.
//!
//! The cooldown against the last submit time is only checked when
//! `enforce_cooldown` is set.

use crate::config::{SecurityConfig, StorageConfig};
use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of a limiter check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Submission may proceed
    Allowed {
        /// Accepted submissions left after this one would succeed
        remaining: u32,
    },
    /// Submission refused
    Limited {
        reason: RateLimitReason,
        /// Time until the limit lifts; `None` when it never does
        retry_after: Option<Duration>,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Reason for limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitReason {
    /// Maximum accepted submissions reached
    AttemptsExhausted,
    /// Last accepted submission was too recent
    Cooldown,
}

impl std::fmt::Display for RateLimitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AttemptsExhausted => write!(f, "Submission attempts exhausted"),
            Self::Cooldown => write!(f, "Submit cooldown active"),
        }
    }
}

/// Attempt limiter over a persisted store.
pub struct SubmissionLimiter<S> {
    store: S,
    max_attempts: u32,
    cooldown: Duration,
    enforce_cooldown: bool,
    last_submit_key: String,
    attempt_count_key: String,
}

impl<S: KeyValueStore> SubmissionLimiter<S> {
    pub fn new(security: &SecurityConfig, storage: &StorageConfig, store: S) -> Self {
        Self {
            store,
            max_attempts: security.max_attempts,
            cooldown: security.cooldown_duration(),
            enforce_cooldown: security.enforce_cooldown,
            last_submit_key: storage.last_submit_key.clone(),
            attempt_count_key: storage.attempt_count_key.clone(),
        }
    }

    /// Check whether another submission may proceed. Read-only.
    pub fn check(&self, now_ms: u64) -> RateLimitResult {
        let attempts = self.attempt_count();
        if attempts >= self.max_attempts {
            debug!(attempts, max = self.max_attempts, "Attempt budget exhausted");
            return RateLimitResult::Limited {
                reason: RateLimitReason::AttemptsExhausted,
                retry_after: None,
            };
        }

        if self.enforce_cooldown {
            if let Some(last) = self.last_submit_ms() {
                let elapsed = Duration::from_millis(now_ms.saturating_sub(last));
                if elapsed < self.cooldown {
                    let retry_after = self.cooldown - elapsed;
                    debug!(?retry_after, "Submit cooldown active");
                    return RateLimitResult::Limited {
                        reason: RateLimitReason::Cooldown,
                        retry_after: Some(retry_after),
                    };
                }
            }
        }

        RateLimitResult::Allowed {
            remaining: self.max_attempts - attempts - 1,
        }
    }

    /// Record an accepted submission. Returns the new count.
    ///
    /// The count is written first; if the timestamp write then fails the
    /// budget is still charged.
    pub fn record_success(&mut self, now_ms: u64) -> Result<u32> {
        let attempts = self.attempt_count().saturating_add(1);
        self.store.set(&self.attempt_count_key, &attempts.to_string())?;
        self.store.set(&self.last_submit_key, &now_ms.to_string())?;
        debug!(attempts, "Recorded accepted submission");
        Ok(attempts)
    }

    /// Persisted count of accepted submissions. Missing, unreadable or
    /// unparsable values count as zero.
    pub fn attempt_count(&self) -> u32 {
        match self.store.get(&self.attempt_count_key) {
            Ok(Some(raw)) => parse_leading_u32(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "Unparsable attempt count, treating as 0");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "Failed to read attempt count, treating as 0");
                0
            }
        }
    }

    /// Persisted time of the last accepted submission.
    pub fn last_submit_ms(&self) -> Option<u64> {
        match self.store.get(&self.last_submit_key) {
            Ok(Some(raw)) => raw.trim().parse().ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read last submit time");
                None
            }
        }
    }

    /// Forget all recorded submissions.
    pub fn reset(&mut self) -> Result<()> {
        self.store.remove(&self.last_submit_key)?;
        self.store.remove(&self.attempt_count_key)?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Parse leading decimal digits after optional whitespace, ignoring any
/// trailing text, the way local-storage counters have always been read.
fn parse_leading_u32(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
