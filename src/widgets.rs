// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Host-side collaborators of the form guard.
//!
//! The guard never touches a page directly. The host implements these
//! traits for its captcha widget, email service and form UI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::info;

/// Page element identifiers.
pub mod elements {
    pub const CONTACT_FORM: &str = "contactForm";
    pub const SUBMIT_BUTTON: &str = "submitBtn";
    pub const ALERT_SUCCESS: &str = "alertSuccess";
    pub const ALERT_ERROR: &str = "alertError";
    pub const ALERT_WARNING: &str = "alertWarning";
    pub const PHONE_DISPLAY: &str = "phoneDisplay";
    pub const NAV_LINKS: &str = "navLinks";
}

/// User-facing messages (Thai).
pub mod messages {
    pub const CAPTCHA_MISSING: &str = "❌ กรุณาติ๊กยืนยันว่าคุณไม่ใช่โปรแกรมอัตโนมัติ";
    pub const ATTEMPTS_EXHAUSTED: &str = "❌ คุณส่งข้อความครบจำนวนแล้ว กรุณาติดต่อทางโทรศัพท์";
    pub const COOLDOWN: &str = "❌ กรุณารอสักครู่ก่อนส่งข้อความอีกครั้ง";
    pub const INVALID_INPUT: &str = "❌ กรุณากรอกข้อมูลให้ถูกต้องตามที่กำหนด";
    pub const SEND_FAILED: &str = "❌ เกิดข้อผิดพลาด กรุณาลองใหม่";
    pub const SUBMIT_IDLE: &str = "ส่งข้อความ";
    pub const SUBMIT_PENDING: &str = "กำลังส่ง...";
}

/// Alert boxes shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    Success,
    Error,
    Warning,
}

impl Alert {
    pub const ALL: [Alert; 3] = [Alert::Success, Alert::Error, Alert::Warning];

    pub fn element_id(&self) -> &'static str {
        match self {
            Alert::Success => elements::ALERT_SUCCESS,
            Alert::Error => elements::ALERT_ERROR,
            Alert::Warning => elements::ALERT_WARNING,
        }
    }
}

/// Captcha widget.
pub trait CaptchaWidget {
    /// Current token; empty when the challenge is not completed.
    fn get_response(&self) -> String;
    fn reset(&mut self);
}

/// Form UI surface.
pub trait FormUi {
    /// Show an alert, optionally replacing its text.
    fn show_alert(&mut self, alert: Alert, text: Option<&str>);
    fn clear_alerts(&mut self);
    /// Disable the submit control and show the pending label, or undo it.
    fn set_submit_pending(&mut self, pending: bool);
    fn reset_form(&mut self);
}

/// Field map handed to the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha_response: String,
    pub timestamp: String,
}

/// Acknowledgement from the email service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReceipt {
    pub status: u16,
    pub text: String,
}

/// Email delivery failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Email service rejected the message ({status}): {text}")]
    Rejected { status: u16, text: String },

    #[error("Email transport failed: {0}")]
    Transport(String),

    #[error("Email service not initialized")]
    NotInitialized,
}

/// Email sending service.
#[async_trait]
pub trait EmailSender {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendReceipt, SendError>;
}

/// Captcha token supplied up front by the host (e.g. posted with the form).
#[derive(Debug, Clone, Default)]
pub struct StaticCaptcha {
    token: String,
    resets: usize,
}

impl StaticCaptcha {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            resets: 0,
        }
    }

    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl CaptchaWidget for StaticCaptcha {
    fn get_response(&self) -> String {
        self.token.clone()
    }

    fn reset(&mut self) {
        self.token.clear();
        self.resets += 1;
    }
}

/// UI that reports every change through `tracing`.
#[derive(Debug, Default)]
pub struct TracingUi;

impl FormUi for TracingUi {
    fn show_alert(&mut self, alert: Alert, text: Option<&str>) {
        info!(alert = alert.element_id(), text = text.unwrap_or(""), "Show alert");
    }

    fn clear_alerts(&mut self) {
        info!("Clear alerts");
    }

    fn set_submit_pending(&mut self, pending: bool) {
        let label = if pending {
            messages::SUBMIT_PENDING
        } else {
            messages::SUBMIT_IDLE
        };
        info!(pending, label, "Submit control");
    }

    fn reset_form(&mut self) {
        info!(form = elements::CONTACT_FORM, "Reset form");
    }
}

/// Sender that accepts everything without delivering it.
#[derive(Debug, Default)]
pub struct DryRunSender {
    sent: AtomicUsize,
}

impl DryRunSender {
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for DryRunSender {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendReceipt, SendError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        info!(
            service_id,
            template_id,
            message_len = params.message.chars().count(),
            "Dry run: email not delivered"
        );
        Ok(SendReceipt {
            status: 200,
            text: "OK".to_string(),
        })
    }
}
