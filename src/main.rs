// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Guard host
//!
//! Runs one contact form submission through the guard and prints the
//! decision as JSON.
//!
//! ## Usage
//!
//! ```text
//! echo '{"from_name":"สมชาย","phone":"0891234567","service":"ตัดหญ้า",
//!        "message":"รบกวนขอใบเสนอราคาด้วยครับ","captcha_token":"...",
//!        "loaded_at_ms":1700000000000}' | form-guard
//! ```
//!
//! ## Configuration
//!
//! - `FORM_GUARD_STORE_PATH`: JSON file holding the attempt counter
//! - `FORM_GUARD_MIN_FILL_MS`: Minimum fill time (default: 3000)
//! - `FORM_GUARD_MAX_ATTEMPTS`: Accepted submissions allowed (default: 5)
//! - `FORM_GUARD_COOLDOWN_MS`: Cooldown between submissions (default: 60000)
//! - `FORM_GUARD_ENFORCE_COOLDOWN`: Enforce the cooldown (default: false)
//! - `FORM_GUARD_DEDUP`: Reject repeated messages (default: false)
//! - `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`: Email template target
//! - `EMAILJS_PUBLIC_KEY`: Enables real delivery; unset means dry run

use anyhow::Context;
use serde::Deserialize;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_form_guard::{
    clock::SystemClock,
    config::Config,
    emailjs::EmailJsSender,
    guard::{ContactForm, FormGuard},
    storage::JsonFileStore,
    widgets::{DryRunSender, EmailSender, StaticCaptcha, TracingUi},
};

/// One submission as posted by the page.
#[derive(Debug, Deserialize)]
struct Submission {
    #[serde(flatten)]
    form: ContactForm,
    #[serde(default)]
    captcha_token: String,
    /// When the page rendered the form; required for the fill-time check
    loaded_at_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the decision
    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        store = %config.storage.path,
        min_fill_time_ms = config.security.min_fill_time_ms,
        max_attempts = config.security.max_attempts,
        live_delivery = config.email.public_key.is_some(),
        "Starting contact form guard"
    );

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("reading submission from stdin")?;
    let submission: Submission =
        serde_json::from_str(&input).context("parsing submission JSON")?;

    let store = JsonFileStore::open(&config.storage.path)
        .with_context(|| format!("opening store {}", config.storage.path))?;

    let sender: Box<dyn EmailSender + Send + Sync> = if config.email.public_key.is_some() {
        Box::new(EmailJsSender::from_config(&config.email))
    } else {
        Box::new(DryRunSender::default())
    };

    let mut guard =
        FormGuard::new(config, store, SystemClock).with_loaded_at(submission.loaded_at_ms);

    let mut captcha = StaticCaptcha::new(submission.captcha_token);
    let mut ui = TracingUi;

    let decision = guard
        .on_submit(&submission.form, &mut captcha, sender.as_ref(), &mut ui)
        .await;

    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
