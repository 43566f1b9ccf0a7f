// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Guard
//!
//! Framework-agnostic submit guard for a small site's contact form:
//!
//! - Plain-text sanitization with a hard length cap
//! - Name / phone / message validators (Latin and Thai input)
//! - Bot heuristics (honeypots, fill time, rapid clicks)
//! - Persisted attempt limiter
//! - Session message deduplication
//! - A submit orchestrator that delegates captcha and email delivery
//!   to host-provided widgets

pub mod bot;
pub mod clock;
pub mod config;
pub mod dedup;
pub mod emailjs;
pub mod error;
pub mod guard;
pub mod limiter;
pub mod menu;
pub mod reveal;
pub mod sanitizer;
pub mod storage;
pub mod validator;
pub mod widgets;

pub use config::Config;
pub use error::{GuardError, Result};
pub use guard::{ContactForm, Decision, FormGuard, SubmissionState};
pub use limiter::{RateLimitResult, SubmissionLimiter};
pub use validator::{FormValidator, ValidationResult};
