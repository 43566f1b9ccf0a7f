// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submit orchestrator.
//!
//! One [`FormGuard`] lives for one page session. It owns the load
//! timestamp, click counters, dedup set and persisted limiter, and runs
//! each submit through a fixed sequence:
//!
//! captcha → clear alerts → bot heuristics → limiter → sanitize →
//! validate → send → feedback
//!
//! Every halt resets the captcha except a missing captcha token, and
//! only a delivered message counts against the attempt budget.

use crate::bot::{BotDetector, BotSignal, BotVerdict, HoneypotFields, SubmitObservation};
use crate::clock::{local_thai_timestamp, Clock, SystemClock};
use crate::config::Config;
use crate::dedup::DedupCache;
use crate::limiter::{RateLimitReason, RateLimitResult, SubmissionLimiter};
use crate::menu::NavMenu;
use crate::reveal::{ClickOutcome, PhoneReveal};
use crate::sanitizer::sanitize;
use crate::storage::KeyValueStore;
use crate::validator::{FormValidator, SanitizedFields, ValidationError, ValidationResult};
use crate::widgets::{
    messages, Alert, CaptchaWidget, EmailSender, FormUi, SendReceipt, TemplateParams,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Raw field values as the page submitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub honeypots: HoneypotFields,
}

impl ContactForm {
    /// Sanitize the four visible fields.
    pub fn sanitize(&self) -> SanitizedFields {
        SanitizedFields {
            from_name: sanitize(&self.from_name),
            phone: sanitize(&self.phone),
            service: sanitize(&self.service),
            message: sanitize(&self.message),
        }
    }
}

/// Orchestrator states for one submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    CaptchaPending,
    SecurityChecking,
    Validating,
    Sending,
    Succeeded,
    Failed,
}

/// How a submit ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// Captcha not completed
    CaptchaMissing,
    /// Dropped silently
    BotSuspected { signal: BotSignal },
    /// Attempt budget or cooldown refused the submit
    RateLimited { reason: RateLimitReason },
    /// A field failed validation
    Invalid { error: ValidationError },
    /// Email service accepted the message
    Sent {
        receipt: SendReceipt,
        params: TemplateParams,
    },
    /// Email service failed; budget untouched
    SendFailed { error: String },
}

impl Decision {
    pub fn is_sent(&self) -> bool {
        matches!(self, Decision::Sent { .. })
    }
}

/// Per-session form guard.
pub struct FormGuard<S, C = SystemClock> {
    config: Config,
    clock: C,
    loaded_at_ms: u64,
    limiter: SubmissionLimiter<S>,
    validator: FormValidator,
    detector: BotDetector,
    reveal: PhoneReveal,
    dedup: DedupCache,
    menu: NavMenu,
    state: SubmissionState,
    transitions: Vec<SubmissionState>,
}

impl<S: KeyValueStore, C: Clock> FormGuard<S, C> {
    /// Start a session; the form counts as loaded now.
    pub fn new(config: Config, store: S, clock: C) -> Self {
        let limiter = SubmissionLimiter::new(&config.security, &config.storage, store);
        let detector = BotDetector::new(&config.security);
        let reveal = PhoneReveal::new(&config.security);
        let loaded_at_ms = clock.now_ms();

        debug!(loaded_at_ms, "Form guard initialized");

        Self {
            config,
            clock,
            loaded_at_ms,
            limiter,
            validator: FormValidator::new(),
            detector,
            reveal,
            dedup: DedupCache::new(),
            menu: NavMenu::new(),
            state: SubmissionState::Idle,
            transitions: Vec::new(),
        }
    }

    /// Override the load timestamp (e.g. when the host knows it).
    pub fn with_loaded_at(mut self, loaded_at_ms: u64) -> Self {
        self.loaded_at_ms = loaded_at_ms;
        self
    }

    /// Page finished loading; restart the fill timer.
    pub fn on_page_load(&mut self) {
        self.loaded_at_ms = self.clock.now_ms();
    }

    /// Click on the phone display.
    pub fn on_phone_click(&mut self) -> ClickOutcome {
        let now = self.clock.now_ms();
        self.reveal.on_click(now)
    }

    /// Run the bot heuristics against the current session state.
    pub fn detect_bot(&self, honeypots: &HoneypotFields) -> BotVerdict {
        self.detector.detect(&SubmitObservation {
            honeypots,
            loaded_at_ms: self.loaded_at_ms,
            now_ms: self.clock.now_ms(),
            rapid_clicks: self.reveal.rapid_clicks(),
        })
    }

    /// Session duplicate check; remembers the message on a miss.
    pub fn is_duplicate(&mut self, message: &str) -> bool {
        self.dedup.is_duplicate(message)
    }

    /// Handle a submit event.
    pub async fn on_submit<W, E, U>(
        &mut self,
        form: &ContactForm,
        captcha: &mut W,
        sender: &E,
        ui: &mut U,
    ) -> Decision
    where
        W: CaptchaWidget,
        E: EmailSender + ?Sized,
        U: FormUi,
    {
        self.transitions.clear();
        self.transition(SubmissionState::CaptchaPending);

        let token = captcha.get_response();
        if token.is_empty() {
            info!("Submit without captcha token");
            ui.show_alert(Alert::Error, Some(messages::CAPTCHA_MISSING));
            return self.finish(Decision::CaptchaMissing);
        }

        ui.clear_alerts();
        self.transition(SubmissionState::SecurityChecking);

        if let BotVerdict::Suspected(signal) = self.detect_bot(&form.honeypots) {
            warn!(%signal, "Bot suspected, dropping submit");
            captcha.reset();
            return self.finish(Decision::BotSuspected { signal });
        }

        let now = self.clock.now_ms();
        if let RateLimitResult::Limited { reason, retry_after } = self.limiter.check(now) {
            info!(%reason, ?retry_after, "Submit rate limited");
            let text = match reason {
                RateLimitReason::AttemptsExhausted => messages::ATTEMPTS_EXHAUSTED,
                RateLimitReason::Cooldown => messages::COOLDOWN,
            };
            ui.show_alert(Alert::Error, Some(text));
            captcha.reset();
            return self.finish(Decision::RateLimited { reason });
        }

        self.transition(SubmissionState::Validating);
        let fields = form.sanitize();

        let mut validation = self.validator.validate(&fields);
        if validation.is_valid()
            && self.config.security.dedup_messages
            && self.dedup.is_duplicate(&fields.message)
        {
            validation = ValidationResult::Invalid(ValidationError::DuplicateMessage);
        }

        if let ValidationResult::Invalid(error) = validation {
            info!(%error, "Submit failed validation");
            ui.show_alert(Alert::Error, Some(messages::INVALID_INPUT));
            captcha.reset();
            return self.finish(Decision::Invalid { error });
        }

        self.transition(SubmissionState::Sending);
        ui.set_submit_pending(true);

        let params = TemplateParams {
            from_name: fields.from_name,
            phone: fields.phone,
            service: fields.service,
            message: fields.message,
            captcha_response: token,
            timestamp: local_thai_timestamp(now),
        };

        let email = &self.config.email;
        let result = sender
            .send(&email.service_id, &email.template_id, &params)
            .await;

        match result {
            Ok(receipt) => {
                self.transition(SubmissionState::Succeeded);
                ui.show_alert(Alert::Success, None);
                ui.reset_form();
                captcha.reset();
                ui.set_submit_pending(false);

                // The message is already delivered; a storage failure only
                // costs the budget update.
                match self.limiter.record_success(self.clock.now_ms()) {
                    Ok(attempts) => info!(attempts, status = receipt.status, "Message sent"),
                    Err(e) => warn!(error = %e, "Message sent but attempt count not persisted"),
                }

                self.finish(Decision::Sent { receipt, params })
            }
            Err(e) => {
                self.transition(SubmissionState::Failed);
                warn!(error = %e, "Email send failed");
                ui.show_alert(Alert::Error, Some(messages::SEND_FAILED));
                captcha.reset();
                ui.set_submit_pending(false);

                if self.config.security.dedup_messages {
                    self.dedup.forget(&params.message);
                }

                self.finish(Decision::SendFailed {
                    error: e.to_string(),
                })
            }
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state, to = ?next, "Submission state");
        self.state = next;
        self.transitions.push(next);
    }

    fn finish(&mut self, decision: Decision) -> Decision {
        self.transition(SubmissionState::Idle);
        decision
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// States visited by the most recent submit, ending in `Idle`.
    pub fn last_transitions(&self) -> &[SubmissionState] {
        &self.transitions
    }

    pub fn loaded_at_ms(&self) -> u64 {
        self.loaded_at_ms
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn limiter(&self) -> &SubmissionLimiter<S> {
        &self.limiter
    }

    pub fn limiter_mut(&mut self) -> &mut SubmissionLimiter<S> {
        &mut self.limiter
    }

    pub fn reveal(&self) -> &PhoneReveal {
        &self.reveal
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut NavMenu {
        &mut self.menu
    }
}
