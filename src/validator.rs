// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form field validators.
//!
//! Implements acceptance rules for the sanitized form fields:
//! - Name: Latin or Thai letters and whitespace, no block words, no long runs
//! - Phone: Thai mobile number `0[689]` + eight digits
//! - Message: minimum substance, no links, no spam keywords, no long runs
//! - Service: must be selected

use crate::sanitizer::utf16_len;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

static NAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\x{0E01}-\x{0E59}a-zA-Z\s]+$").expect("static regex"));

static MOBILE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0[689][0-9]{8}$").expect("static regex"));

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://").expect("static regex"));

static SPAM_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)viagra|cialis|casino|lottery|winner|prize|congratulations|click here|free money")
        .expect("static regex")
});

const BLOCKED_NAME_WORDS: &[&str] = &["test", "xxx", "admin", "spam", "bot", "script", "hack"];

/// Characters ignored when judging whether a message says anything.
const FILLER_CHARS: &[char] = &['.', ',', '!', '?', '-', '_', '(', ')'];

/// Minimum lengths, in UTF-16 code units.
const MIN_MESSAGE_UNITS: usize = 10;
const MIN_MEANINGFUL_UNITS: usize = 5;
const NAME_MAX_RUN: usize = 5;
const MESSAGE_MAX_RUN: usize = 11;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Invalid name")]
    InvalidName,

    #[error("Invalid phone number")]
    InvalidPhone,

    #[error("Invalid message")]
    InvalidMessage,

    #[error("Missing required field: service")]
    MissingService,

    #[error("Duplicate message")]
    DuplicateMessage,
}

/// Result of validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields acceptable
    Valid,
    /// First failing field
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }
}

/// Form fields after sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizedFields {
    pub from_name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

/// Whole-form validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate every field, reporting the first failure in form order.
    pub fn validate(&self, fields: &SanitizedFields) -> ValidationResult {
        let failure = if !validate_name(&fields.from_name) {
            Some(ValidationError::InvalidName)
        } else if !validate_phone(&fields.phone) {
            Some(ValidationError::InvalidPhone)
        } else if !validate_message(&fields.message) {
            Some(ValidationError::InvalidMessage)
        } else if fields.service.is_empty() {
            Some(ValidationError::MissingService)
        } else {
            None
        };

        match failure {
            Some(err) => {
                debug!(error = %err, "Form validation failed");
                ValidationResult::Invalid(err)
            }
            None => ValidationResult::Valid,
        }
    }
}

/// Accept Latin/Thai letters and whitespace without block words or long runs.
pub fn validate_name(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();

    if BLOCKED_NAME_WORDS.iter().any(|word| lowered.contains(word)) {
        return false;
    }

    if has_run(&lowered, NAME_MAX_RUN) {
        return false;
    }

    NAME_CHARS.is_match(name)
}

/// Accept a ten-digit Thai mobile number, ignoring hyphens and spaces.
pub fn validate_phone(phone: &str) -> bool {
    let clean: String = phone
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    if is_single_repeated_digit(&clean) {
        return false;
    }

    MOBILE_NUMBER.is_match(&clean)
}

/// Accept a message with real content and no spam markers.
pub fn validate_message(message: &str) -> bool {
    let trimmed = message.trim();

    if utf16_len(trimmed) < MIN_MESSAGE_UNITS {
        return false;
    }

    let meaningful: usize = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !FILLER_CHARS.contains(c))
        .map(char::len_utf16)
        .sum();
    if meaningful < MIN_MEANINGFUL_UNITS {
        return false;
    }

    if LINK.is_match(message) {
        return false;
    }

    if contains_spam_keyword(message) {
        return false;
    }

    !has_run(message, MESSAGE_MAX_RUN)
}

/// Whole-word keyword match. Word boundaries are ASCII-only so a keyword
/// glued to Thai text still counts as a separate word.
fn contains_spam_keyword(text: &str) -> bool {
    SPAM_KEYWORD.find_iter(text).any(|m| {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        !before.is_some_and(is_ascii_word) && !after.is_some_and(is_ascii_word)
    })
}

fn is_ascii_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// True when some character occurs `run` or more times in a row.
///
/// Line terminators never form a run. Neither do characters outside the
/// Basic Multilingual Plane, whose UTF-16 halves alternate.
fn has_run(text: &str, run: usize) -> bool {
    let mut prev: Option<char> = None;
    let mut count = 0usize;
    for c in text.chars() {
        if is_line_terminator(c) || c.len_utf16() > 1 {
            prev = None;
            count = 0;
            continue;
        }
        if Some(c) == prev {
            count += 1;
        } else {
            prev = Some(c);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_single_repeated_digit(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() => {
            let rest = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c == first)
        }
        _ => false,
    }
}
