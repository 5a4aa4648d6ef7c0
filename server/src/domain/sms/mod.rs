//! Outbound SMS delivery
//!
//! Wraps the MessageBird REST API behind a trait seam so the ticket
//! workflows never depend on the concrete gateway. When delivery is
//! disabled in the configuration, a logging no-op sender is used
//! instead and the rest of the application behaves identically.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use thiserror::Error;

use crate::core::config::SmsConfig;
use crate::core::constants::{SMS_ERROR_BODY_MAX_LEN, SMS_SEND_TIMEOUT_SECS};

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Error, Debug)]
pub enum SmsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SMS gateway rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

// ============================================================================
// SENDER TRAIT
// ============================================================================

/// Outbound SMS delivery capability
///
/// Implemented by the MessageBird REST client and by a logging no-op
/// used when delivery is disabled.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a text message to a single recipient
    async fn send(&self, recipient: &str, body: &str) -> Result<(), SmsError>;
}

/// Build the configured sender: the MessageBird client when delivery is
/// enabled, a logging no-op otherwise.
pub fn from_config(config: &SmsConfig) -> Result<Arc<dyn SmsSender>, SmsError> {
    if config.enabled {
        Ok(Arc::new(MessageBirdSender::new(config)?))
    } else {
        Ok(Arc::new(NoopSender))
    }
}

// ============================================================================
// MESSAGEBIRD CLIENT
// ============================================================================

/// MessageBird REST API client
///
/// Posts form-encoded messages to the configured endpoint with
/// `Authorization: AccessKey <key>`.
pub struct MessageBirdSender {
    client: reqwest::Client,
    access_key: String,
    originator: String,
    api_url: String,
}

impl MessageBirdSender {
    pub fn new(config: &SmsConfig) -> Result<Self, SmsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SMS_SEND_TIMEOUT_SECS))
            .user_agent(format!("TextDesk/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            access_key: config.access_key.clone(),
            originator: config.originator.clone(),
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl SmsSender for MessageBirdSender {
    async fn send(&self, recipient: &str, body: &str) -> Result<(), SmsError> {
        let params = [
            ("recipients", recipient),
            ("originator", self.originator.as_str()),
            ("body", body),
        ];

        let resp = self
            .client
            .post(&self.api_url)
            .header(
                header::AUTHORIZATION,
                format!("AccessKey {}", self.access_key),
            )
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(recipient, "SMS accepted by gateway");
            return Ok(());
        }

        // Keep the error body small enough to log
        let body = resp.text().await.unwrap_or_default();
        let body: String = body.chars().take(SMS_ERROR_BODY_MAX_LEN).collect();
        Err(SmsError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

// ============================================================================
// DISABLED-MODE SENDER
// ============================================================================

/// Sender used when outbound delivery is disabled. Logs the message
/// instead of delivering it, so local setups work without credentials.
pub struct NoopSender;

#[async_trait]
impl SmsSender for NoopSender {
    async fn send(&self, recipient: &str, body: &str) -> Result<(), SmsError> {
        tracing::info!(recipient, body, "SMS delivery disabled, message logged only");
        Ok(())
    }
}
