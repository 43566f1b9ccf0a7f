// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for security testing.

use super::generators;
use contact_form_guard::guard::ContactForm;

/// How each submission in a run is corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    /// Well-formed submissions
    Legitimate,
    /// Spam bodies from the generator pool
    SpamMessage,
    /// Bot-like names
    BotName,
    /// Invalid phone numbers
    BadPhone,
    /// Hidden fields filled in
    Honeypot,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of submissions
    pub total_submissions: usize,
    /// Field corruption applied to each submission
    pub tactic: Tactic,
    /// Time between page load and submit
    pub fill_time_ms: u64,
    /// Whether the captcha is completed
    pub with_captcha: bool,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_submissions: 20,
            tactic: Tactic::Legitimate,
            fill_time_ms: 8_000,
            with_captcha: true,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Spam bodies typed at human speed.
    pub fn spam_flood() -> Self {
        Self {
            total_submissions: generators::spam_messages().len(),
            tactic: Tactic::SpamMessage,
            ..Default::default()
        }
    }

    /// Scripted filler that populates every input it finds.
    pub fn honeypot_filler() -> Self {
        Self {
            total_submissions: generators::filled_honeypots().len(),
            tactic: Tactic::Honeypot,
            ..Default::default()
        }
    }

    /// Valid data posted instantly after load.
    pub fn instant_submitter() -> Self {
        Self {
            total_submissions: 30,
            fill_time_ms: 150,
            ..Default::default()
        }
    }

    /// Bot that never solves the captcha.
    pub fn captcha_skipper() -> Self {
        Self {
            total_submissions: 15,
            with_captcha: false,
            ..Default::default()
        }
    }

    /// A real customer who keeps coming back.
    pub fn persistent_customer() -> Self {
        Self {
            total_submissions: 12,
            ..Default::default()
        }
    }

    /// Build the `i`th submission of the run.
    pub fn form(&self, i: usize) -> ContactForm {
        let mut form = generators::legitimate_form(i);
        match self.tactic {
            Tactic::Legitimate => {}
            Tactic::SpamMessage => {
                let pool = generators::spam_messages();
                form.message = pool[i % pool.len()].to_string();
            }
            Tactic::BotName => {
                let pool = generators::bot_names();
                form.from_name = pool[i % pool.len()].to_string();
            }
            Tactic::BadPhone => {
                let pool = generators::bad_phones();
                form.phone = pool[i % pool.len()].to_string();
            }
            Tactic::Honeypot => {
                let pool = generators::filled_honeypots();
                form.honeypots = pool[i % pool.len()].clone();
            }
        }
        form
    }
}
