// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session-scoped duplicate message detection.
//!
//! Messages are normalized (trimmed, lower-cased) and hashed with a
//! 31-multiplier rolling hash over their UTF-8 bytes. The hash is not
//! cryptographic; collisions are reported as duplicates.

use std::collections::HashSet;
use tracing::debug;

/// Rolling hash of the normalized message, wrapped to `i32` at each step.
pub fn message_hash(message: &str) -> i32 {
    let normalized = message.trim().to_lowercase();
    normalized.bytes().fold(0i32, |hash, byte| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(byte))
    })
}

/// Set of hashes of messages seen this session.
#[derive(Debug, Default)]
pub struct DedupCache {
    seen: HashSet<String>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the message was seen before; otherwise remembers it.
    pub fn is_duplicate(&mut self, message: &str) -> bool {
        let key = message_hash(message).to_string();
        if self.seen.contains(&key) {
            debug!(hash = %key, "Duplicate message");
            return true;
        }
        self.seen.insert(key);
        false
    }

    /// Drop a remembered message so it can be submitted again.
    pub fn forget(&mut self, message: &str) -> bool {
        self.seen.remove(&message_hash(message).to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
