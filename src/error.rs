// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the form guard.

use thiserror::Error;

/// Infrastructure errors. Form-level rejections are reported through
/// [`crate::guard::Decision`], not through this type.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GuardError>;
