// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact form guard.
//!
//! Defaults reproduce the thresholds the site has always shipped with:
//! 3 s minimum fill time, 5 accepted submissions per browser, a 60 s
//! cooldown that is declared but only enforced when opted in.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bot, limiter and dedup thresholds
    #[serde(default)]
    pub security: SecurityConfig,

    /// Email delivery identifiers
    #[serde(default)]
    pub email: EmailConfig,

    /// Persisted storage layout
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Security thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Cooldown between accepted submissions in milliseconds (default: 60000)
    #[serde(default = "default_submit_cooldown_ms")]
    pub submit_cooldown_ms: u64,

    /// Minimum time between page load and submit in milliseconds (default: 3000)
    #[serde(default = "default_min_fill_time_ms")]
    pub min_fill_time_ms: u64,

    /// Maximum accepted submissions per persisted store (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rapid clicks above this count flag the submitter as a bot (default: 10)
    #[serde(default = "default_max_rapid_clicks")]
    pub max_rapid_clicks: u32,

    /// Two clicks closer than this are "rapid" (default: 500)
    #[serde(default = "default_rapid_click_window_ms")]
    pub rapid_click_window_ms: u64,

    /// Phone reveal is suppressed once rapid clicks exceed this (default: 3)
    #[serde(default = "default_reveal_suppress_after")]
    pub reveal_suppress_after: u32,

    /// Reject submits inside `submit_cooldown_ms` of the last success (default: false)
    #[serde(default)]
    pub enforce_cooldown: bool,

    /// Reject message bodies already sent this session (default: false)
    #[serde(default)]
    pub dedup_messages: bool,
}

/// Email service identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// EmailJS service identifier
    #[serde(default = "default_service_id")]
    pub service_id: String,

    /// EmailJS template identifier
    #[serde(default = "default_template_id")]
    pub template_id: String,

    /// EmailJS public key; `None` means dry-run delivery
    #[serde(default)]
    pub public_key: Option<String>,

    /// REST endpoint for sends
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Persisted key/value layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the store (default: form-guard-store.json)
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Key holding the last successful submit timestamp
    #[serde(default = "default_last_submit_key")]
    pub last_submit_key: String,

    /// Key holding the accepted submission count
    #[serde(default = "default_attempt_count_key")]
    pub attempt_count_key: String,
}

// Default value functions
fn default_submit_cooldown_ms() -> u64 {
    60000
}

fn default_min_fill_time_ms() -> u64 {
    3000
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_rapid_clicks() -> u32 {
    10
}

fn default_rapid_click_window_ms() -> u64 {
    500
}

fn default_reveal_suppress_after() -> u32 {
    3
}

fn default_service_id() -> String {
    "service_liwyg8j".to_string()
}

fn default_template_id() -> String {
    "template_qfqgy9o".to_string()
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

fn default_store_path() -> String {
    "form-guard-store.json".to_string()
}

fn default_last_submit_key() -> String {
    "kp_last_submit".to_string()
}

fn default_attempt_count_key() -> String {
    "kp_attempt_count".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            security: SecurityConfig::default(),
            email: EmailConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            submit_cooldown_ms: default_submit_cooldown_ms(),
            min_fill_time_ms: default_min_fill_time_ms(),
            max_attempts: default_max_attempts(),
            max_rapid_clicks: default_max_rapid_clicks(),
            rapid_click_window_ms: default_rapid_click_window_ms(),
            reveal_suppress_after: default_reveal_suppress_after(),
            enforce_cooldown: false,
            dedup_messages: false,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            template_id: default_template_id(),
            public_key: None,
            endpoint: default_endpoint(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            last_submit_key: default_last_submit_key(),
            attempt_count_key: default_attempt_count_key(),
        }
    }
}

impl SecurityConfig {
    /// Get the submit cooldown duration
    pub fn cooldown_duration(&self) -> Duration {
        Duration::from_millis(self.submit_cooldown_ms)
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let flag = |key: &str| {
            lookup(key).map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        };

        let defaults = SecurityConfig::default();
        let security = SecurityConfig {
            min_fill_time_ms: parsed("FORM_GUARD_MIN_FILL_MS").unwrap_or(defaults.min_fill_time_ms),
            max_attempts: parsed("FORM_GUARD_MAX_ATTEMPTS")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.max_attempts),
            submit_cooldown_ms: parsed("FORM_GUARD_COOLDOWN_MS")
                .unwrap_or(defaults.submit_cooldown_ms),
            enforce_cooldown: flag("FORM_GUARD_ENFORCE_COOLDOWN").unwrap_or(false),
            dedup_messages: flag("FORM_GUARD_DEDUP").unwrap_or(false),
            ..defaults
        };

        let email_defaults = EmailConfig::default();
        let email = EmailConfig {
            service_id: lookup("EMAILJS_SERVICE_ID").unwrap_or(email_defaults.service_id),
            template_id: lookup("EMAILJS_TEMPLATE_ID").unwrap_or(email_defaults.template_id),
            public_key: lookup("EMAILJS_PUBLIC_KEY").filter(|k| !k.trim().is_empty()),
            ..email_defaults
        };

        let storage = StorageConfig {
            path: lookup("FORM_GUARD_STORE_PATH").unwrap_or_else(default_store_path),
            ..Default::default()
        };

        Self {
            security,
            email,
            storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.security.min_fill_time_ms, 3000);
        assert_eq!(config.security.max_attempts, 5);
        assert_eq!(config.security.cooldown_duration(), Duration::from_secs(60));
        assert!(!config.security.enforce_cooldown);
        assert!(config.email.public_key.is_none());
        assert_eq!(config.storage.attempt_count_key, "kp_attempt_count");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FORM_GUARD_MIN_FILL_MS", "1500"),
            ("FORM_GUARD_MAX_ATTEMPTS", "2"),
            ("FORM_GUARD_DEDUP", "true"),
            ("EMAILJS_PUBLIC_KEY", "pk_live"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.security.min_fill_time_ms, 1500);
        assert_eq!(config.security.max_attempts, 2);
        assert!(config.security.dedup_messages);
        assert_eq!(config.email.public_key.as_deref(), Some("pk_live"));
        assert_eq!(config.email.service_id, "service_liwyg8j");
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = Config::from_lookup(|k| match k {
            "FORM_GUARD_MAX_ATTEMPTS" => Some("lots".to_string()),
            "EMAILJS_PUBLIC_KEY" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.security.max_attempts, 5);
        assert!(config.email.public_key.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"security": {"max_attempts": 9}}"#).unwrap();
        assert_eq!(config.security.max_attempts, 9);
        assert_eq!(config.security.min_fill_time_ms, 3000);
        assert_eq!(config.email.template_id, "template_qfqgy9o");
    }
}
