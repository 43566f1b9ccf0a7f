// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! EmailJS REST sender.

use crate::config::EmailConfig;
use crate::widgets::{EmailSender, SendError, SendReceipt, TemplateParams};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Sender posting to the EmailJS `email/send` endpoint.
pub struct EmailJsSender {
    endpoint: String,
    public_key: Option<String>,
    client: reqwest::Client,
}

impl EmailJsSender {
    /// Create an uninitialized sender; sends fail until [`Self::init`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            public_key: None,
            client: reqwest::Client::new(),
        }
    }

    /// Create a sender from configuration, initialized when a key is set.
    pub fn from_config(config: &EmailConfig) -> Self {
        let mut sender = Self::new(config.endpoint.clone());
        if let Some(key) = &config.public_key {
            sender.init(key.clone());
        }
        sender
    }

    /// Set the account public key.
    pub fn init(&mut self, public_key: impl Into<String>) {
        self.public_key = Some(public_key.into());
    }

    pub fn is_initialized(&self) -> bool {
        self.public_key.is_some()
    }
}

#[async_trait]
impl EmailSender for EmailJsSender {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<SendReceipt, SendError> {
        let user_id = self.public_key.as_deref().ok_or(SendError::NotInitialized)?;

        let body = SendRequest {
            service_id,
            template_id,
            user_id,
            template_params: params,
        };

        debug!(service_id, template_id, endpoint = %self.endpoint, "Sending email");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(SendReceipt {
                status: status.as_u16(),
                text,
            })
        } else {
            warn!(status = status.as_u16(), "Email service rejected send");
            Err(SendError::Rejected {
                status: status.as_u16(),
                text,
            })
        }
    }
}
